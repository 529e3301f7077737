//! The wallet state store: commands in, snapshots out.

use std::future::Future;
use std::num::NonZeroU64;

use dompet_gateway::Gateway;
use dompet_transport::{AuthState, TransportError};
use dompet_types::{
    Balance, Banner, HistoryPage, OperationStatus, Profile, ProfileImage, Service, TopUpAmount,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::WalletError;
use crate::operation::Operation;
use crate::snapshot::{PaymentOutcome, Slot, WalletSnapshot, Write};

/// Behavior switches for [`WalletStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    /// Drop a response for profile, balance, services or banners when a
    /// later dispatch for the same slot has already been applied.
    pub discard_stale_responses: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            discard_stale_responses: true,
        }
    }
}

/// Identifies one dispatch so its settlement can be matched to the state it
/// was issued against.
#[derive(Clone, Copy, Debug, Default)]
struct Ticket {
    generation: u64,
    seq: u64,
}

/// Owns the wallet cache and drives every command through its lifecycle.
///
/// Commands never leave the store in a half-applied state: each transition
/// is a single `watch` update. A rejected command records its message in
/// the snapshot and also returns it as a [`WalletError`].
pub struct WalletStore {
    gateway: Gateway,
    options: StoreOptions,
    state: watch::Sender<WalletSnapshot>,
}

impl WalletStore {
    pub fn new(gateway: Gateway, options: StoreOptions) -> Self {
        let (state, _) = watch::channel(WalletSnapshot::default());
        Self {
            gateway,
            options,
            state,
        }
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.state.subscribe()
    }

    // ── Fetches ─────────────────────────────────────────────────────────

    pub async fn fetch_profile(&self) -> Result<Profile, WalletError> {
        self.refresh_slot(
            Operation::Profile,
            Slot::Profile,
            Write::Fetch,
            self.gateway.get_profile(),
            |s, profile| s.profile = Some(profile),
        )
        .await
    }

    pub async fn fetch_balance(&self) -> Result<Balance, WalletError> {
        self.refresh_slot(
            Operation::Balance,
            Slot::Balance,
            Write::Fetch,
            self.gateway.get_balance(),
            |s, balance| s.balance = Some(balance),
        )
        .await
    }

    pub async fn fetch_services(&self) -> Result<Vec<Service>, WalletError> {
        self.refresh_slot(
            Operation::Services,
            Slot::Services,
            Write::Fetch,
            self.gateway.get_services(),
            |s, services| s.services = services,
        )
        .await
    }

    pub async fn fetch_banners(&self) -> Result<Vec<Banner>, WalletError> {
        self.refresh_slot(
            Operation::Banners,
            Slot::Banners,
            Write::Fetch,
            self.gateway.get_banners(),
            |s, banners| s.banners = banners,
        )
        .await
    }

    /// Everything the home screen shows, dispatched together. Each fetch
    /// settles through its own lifecycle; the first failure is returned.
    pub async fn load_home(&self) -> Result<(), WalletError> {
        let (profile, balance, services, banners) = futures::join!(
            self.fetch_profile(),
            self.fetch_balance(),
            self.fetch_services(),
            self.fetch_banners(),
        );
        profile?;
        balance?;
        services?;
        banners?;
        Ok(())
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Top up and adopt the balance the server reports.
    pub async fn top_up(&self, amount: TopUpAmount) -> Result<Balance, WalletError> {
        let balance = self
            .refresh_slot(
                Operation::TopUp,
                Slot::Balance,
                Write::Mutation,
                self.gateway.top_up(amount),
                |s, balance| s.balance = Some(balance),
            )
            .await?;
        info!(amount = amount.amount(), balance = balance.amount(), "top up succeeded");
        Ok(balance)
    }

    /// Pay for a service, then refresh the balance.
    ///
    /// The refresh only runs once the payment is confirmed. If either call
    /// fails the operation is rejected and the cached balance is untouched.
    pub async fn make_transaction(&self, service_code: &str) -> Result<PaymentOutcome, WalletError> {
        let op = Operation::Transaction;
        let ticket = self.begin(op, None);

        let receipt = self
            .gateway
            .make_transaction(service_code)
            .await
            .map_err(|e| self.reject(op, ticket, e))?;
        info!(
            invoice = %receipt.invoice_number,
            service = %receipt.service_code,
            amount = receipt.total_amount,
            "payment accepted"
        );

        let seq = self.issue(Slot::Balance);
        let balance = self
            .gateway
            .get_balance()
            .await
            .map_err(|e| self.reject(op, ticket, e))?;

        let outcome = PaymentOutcome { receipt, balance };
        let payload = outcome.clone();
        self.fulfil(op, ticket, |s| {
            if self.fresh(s, Slot::Balance, seq, Write::Fetch) {
                s.balance = Some(balance);
            }
            s.last_payment = Some(payload);
        });
        Ok(outcome)
    }

    pub async fn update_profile(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Profile, WalletError> {
        self.refresh_slot(
            Operation::UpdateProfile,
            Slot::Profile,
            Write::Mutation,
            self.gateway.update_profile(first_name, last_name),
            |s, profile| s.profile = Some(profile),
        )
        .await
    }

    pub async fn upload_image(&self, image: &ProfileImage) -> Result<Profile, WalletError> {
        self.refresh_slot(
            Operation::UploadImage,
            Slot::Profile,
            Write::Mutation,
            self.gateway.upload_profile_image(image),
            |s, profile| s.profile = Some(profile),
        )
        .await
    }

    // ── Ledger ──────────────────────────────────────────────────────────

    /// Fetch one history page and fold it into the ledger.
    ///
    /// Offset 0 replaces the accumulated records; any other offset appends.
    /// Concurrent calls are not coordinated: pages land in completion order.
    pub async fn fetch_history_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<HistoryPage, WalletError> {
        let limit = self.page_size(limit)?;
        let ticket = self.begin(Operation::History, None);
        self.load_page(ticket, offset, limit).await
    }

    /// Forget the accumulated ledger and rewind the cursor.
    pub fn reset_ledger(&self) {
        self.state.send_modify(|s| s.ledger.reset());
    }

    /// Reset the ledger, then load its first page.
    pub async fn load_first_page(&self, limit: u64) -> Result<HistoryPage, WalletError> {
        let limit = self.page_size(limit)?;
        self.reset_ledger();
        let ticket = self.begin(Operation::History, None);
        self.load_page(ticket, 0, limit).await
    }

    /// Load the page after the cursor, unless the ledger looks complete or a
    /// history page is already in flight. Returns whether a page was loaded.
    pub async fn load_next_page(&self, limit: u64) -> Result<bool, WalletError> {
        let limit = self.page_size(limit)?;
        let mut dispatch = None;
        self.state.send_if_modified(|s| {
            if !s.ledger.has_more() || s.operations.is_pending(Operation::History) {
                return false;
            }
            s.operations.set(Operation::History, OperationStatus::Pending);
            let ticket = Ticket {
                generation: s.generation,
                seq: 0,
            };
            dispatch = Some((ticket, s.ledger.offset()));
            true
        });

        let Some((ticket, offset)) = dispatch else {
            debug!("next history page not dispatched");
            return Ok(false);
        };
        self.load_page(ticket, offset, limit).await?;
        Ok(true)
    }

    async fn load_page(
        &self,
        ticket: Ticket,
        offset: u64,
        limit: NonZeroU64,
    ) -> Result<HistoryPage, WalletError> {
        let page = self
            .gateway
            .get_transaction_history(offset, limit)
            .await
            .map_err(|e| self.reject(Operation::History, ticket, e))?;
        let records = page.records.clone();
        self.fulfil(Operation::History, ticket, |s| {
            s.ledger.apply_page(offset, limit, records)
        });
        Ok(page)
    }

    fn page_size(&self, limit: u64) -> Result<NonZeroU64, WalletError> {
        NonZeroU64::new(limit).ok_or_else(|| {
            let err = WalletError::InvalidPageSize;
            warn!("history page requested with zero limit");
            let message = err.message();
            self.state.send_modify(|s| {
                s.operations
                    .set(Operation::History, OperationStatus::Rejected(message.clone()));
                s.is_error = true;
                s.message = Some(message);
            });
            err
        })
    }

    // ── Acknowledgment and teardown ─────────────────────────────────────

    /// Return every family to idle and drop the current message.
    pub fn reset_operation_status(&self) {
        self.state.send_modify(|s| {
            s.operations.reset_all();
            s.is_error = false;
            s.message = None;
        });
    }

    /// Return one family to idle.
    pub fn reset_operation(&self, op: Operation) {
        self.state
            .send_modify(|s| s.operations.set(op, OperationStatus::Idle));
    }

    /// Drop all cached data, e.g. on sign-out. Responses to commands
    /// dispatched before the call are ignored when they arrive.
    pub fn clear(&self) {
        self.state.send_modify(wipe);
        debug!("wallet cache cleared");
    }

    // ── Lifecycle plumbing ──────────────────────────────────────────────

    async fn refresh_slot<T, F>(
        &self,
        op: Operation,
        slot: Slot,
        write: Write,
        call: F,
        store: impl FnOnce(&mut WalletSnapshot, T),
    ) -> Result<T, WalletError>
    where
        T: Clone,
        F: Future<Output = Result<T, TransportError>>,
    {
        let ticket = self.begin(op, Some(slot));
        let value = call.await.map_err(|e| self.reject(op, ticket, e))?;
        let payload = value.clone();
        self.fulfil(op, ticket, |s| {
            if self.fresh(s, slot, ticket.seq, write) {
                store(s, payload);
            } else {
                debug!(operation = %op, seq = ticket.seq, "discarding stale response");
            }
        });
        Ok(value)
    }

    /// Idle/terminal -> Pending. Cached data stays visible.
    fn begin(&self, op: Operation, slot: Option<Slot>) -> Ticket {
        let mut ticket = Ticket::default();
        self.state.send_modify(|s| {
            s.operations.set(op, OperationStatus::Pending);
            ticket = Ticket {
                generation: s.generation,
                seq: slot.map_or(0, |slot| s.sequences.issue(slot)),
            };
        });
        debug!(operation = %op, "dispatched");
        ticket
    }

    /// Number a slot write that was not known at dispatch time.
    fn issue(&self, slot: Slot) -> u64 {
        let mut seq = 0;
        self.state.send_if_modified(|s| {
            seq = s.sequences.issue(slot);
            false
        });
        seq
    }

    fn fresh(&self, s: &mut WalletSnapshot, slot: Slot, seq: u64, write: Write) -> bool {
        s.sequences
            .accept(slot, seq, write, self.options.discard_stale_responses)
    }

    fn fulfil(&self, op: Operation, ticket: Ticket, write: impl FnOnce(&mut WalletSnapshot)) {
        self.state.send_if_modified(|s| {
            if s.generation != ticket.generation {
                debug!(operation = %op, "ignoring response issued before cache was cleared");
                return false;
            }
            write(s);
            s.operations.set(op, OperationStatus::Fulfilled(()));
            s.is_error = false;
            s.message = op.success_message().map(str::to_string);
            true
        });
    }

    /// Record a failure. Cached data is left as it was, unless the failure
    /// signed the session out.
    fn reject(&self, op: Operation, ticket: Ticket, source: TransportError) -> WalletError {
        let message = source
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| op.fallback_message().to_string());
        warn!(operation = %op, error = %source, "operation rejected");
        let expired = source.is_unauthorized()
            && self.gateway.channel().vault().state() == AuthState::Expired;
        self.state.send_if_modified(|s| {
            if s.generation != ticket.generation {
                return false;
            }
            if expired {
                debug!("session expired, dropping cached wallet data");
                wipe(s);
            }
            s.operations
                .set(op, OperationStatus::Rejected(message.clone()));
            s.is_error = true;
            s.message = Some(message.clone());
            true
        });
        WalletError::Rejected {
            operation: op,
            message,
            source,
        }
    }
}

/// Reset every cached value and start a new generation.
fn wipe(s: &mut WalletSnapshot) {
    let generation = s.generation + 1;
    *s = WalletSnapshot {
        generation,
        ..WalletSnapshot::default()
    };
}
