//! Human-readable and JSON rendering of command results.

use dompet_types::{Balance, Banner, Profile, Service, TransactionReceipt, TransactionRecord};
use dompet_utils::{format_rupiah, format_wib};
use dompet_wallet_core::PaymentOutcome;
use serde::Serialize;

/// How command results are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    Human,
    Json,
}

impl Output {
    /// Print `value`, either as pretty JSON or through `human`.
    pub fn emit<T: Serialize + ?Sized>(
        &self,
        value: &T,
        human: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<()> {
        match self {
            Output::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Output::Human => println!("{}", human(value)),
        }
        Ok(())
    }
}

pub fn profile(profile: &Profile) -> String {
    let image = if profile.has_custom_image() {
        profile.profile_image.as_str()
    } else {
        "(default)"
    };
    format!(
        "Name:  {}\nEmail: {}\nImage: {}",
        profile.full_name(),
        profile.email,
        image
    )
}

pub fn balance(balance: &Balance) -> String {
    format!("Balance: {}", format_rupiah(balance.amount()))
}

pub fn services(services: &[Service]) -> String {
    services
        .iter()
        .map(|s| {
            format!(
                "{:<14} {:<24} {}",
                s.service_code,
                s.service_name,
                format_rupiah(s.service_tariff)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn banners(banners: &[Banner]) -> String {
    banners
        .iter()
        .map(|b| format!("{}: {}", b.banner_name, b.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn record(record: &TransactionRecord) -> String {
    let sign = if record.transaction_type.is_credit() {
        '+'
    } else {
        '-'
    };
    format!(
        "{sign} {:<14} {:<28} {}",
        format_rupiah(record.total_amount),
        format_wib(record.created_on),
        record.description
    )
}

pub fn records(records: &[TransactionRecord]) -> String {
    if records.is_empty() {
        return "No transactions yet".to_string();
    }
    records.iter().map(record).collect::<Vec<_>>().join("\n")
}

/// JSON shape of a completed payment.
#[derive(Serialize)]
pub struct PaymentView<'a> {
    pub receipt: &'a TransactionReceipt,
    pub balance: Balance,
}

impl<'a> From<&'a PaymentOutcome> for PaymentView<'a> {
    fn from(outcome: &'a PaymentOutcome) -> Self {
        Self {
            receipt: &outcome.receipt,
            balance: outcome.balance,
        }
    }
}

pub fn payment(view: &PaymentView<'_>) -> String {
    format!(
        "Paid {} for {} ({})\nInvoice: {}\nDate:    {}\n{}",
        format_rupiah(view.receipt.total_amount),
        view.receipt.service_name,
        view.receipt.service_code,
        view.receipt.invoice_number,
        format_wib(view.receipt.created_on),
        balance(&view.balance)
    )
}
