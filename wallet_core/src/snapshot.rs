//! The immutable view published to subscribers.

use dompet_types::{Balance, Banner, OperationStatus, Profile, Service, TransactionReceipt};

use crate::ledger::Ledger;
use crate::operation::{Operation, OperationTable};

/// Combined result of a payment and the balance refresh that follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub receipt: TransactionReceipt,
    pub balance: Balance,
}

/// Everything the wallet UI renders from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub profile: Option<Profile>,
    pub balance: Option<Balance>,
    pub services: Vec<Service>,
    pub banners: Vec<Banner>,
    pub ledger: Ledger,
    /// Payload of the last fulfilled payment.
    pub last_payment: Option<PaymentOutcome>,
    pub operations: OperationTable,
    /// Whether the most recent terminal transition was a rejection.
    pub is_error: bool,
    /// Message of the most recent terminal transition, if it had one.
    pub message: Option<String>,
    pub(crate) sequences: Sequences,
    pub(crate) generation: u64,
}

impl WalletSnapshot {
    /// Any operation family in flight.
    pub fn is_loading(&self) -> bool {
        self.operations.any_pending()
    }

    pub fn status(&self, op: Operation) -> &OperationStatus<()> {
        self.operations.get(op)
    }

    /// Looks up a catalog entry by its code.
    pub fn service(&self, service_code: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.service_code == service_code)
    }
}

/// Cache slots that are overwritten wholesale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Profile,
    Balance,
    Services,
    Banners,
}

/// What kind of dispatch produced a slot write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Write {
    /// A plain read of server state.
    Fetch,
    /// The server's answer to a change the user made. Always applied.
    Mutation,
}

/// Dispatch ordering for one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SlotSequence {
    issued: u64,
    committed: u64,
}

/// Per-slot monotonic sequence numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Sequences {
    profile: SlotSequence,
    balance: SlotSequence,
    services: SlotSequence,
    banners: SlotSequence,
}

impl Sequences {
    fn slot(&mut self, slot: Slot) -> &mut SlotSequence {
        match slot {
            Slot::Profile => &mut self.profile,
            Slot::Balance => &mut self.balance,
            Slot::Services => &mut self.services,
            Slot::Banners => &mut self.banners,
        }
    }

    /// Number the next dispatch that will write `slot`.
    pub(crate) fn issue(&mut self, slot: Slot) -> u64 {
        let seq = self.slot(slot);
        seq.issued += 1;
        seq.issued
    }

    /// Whether a response numbered `seq` may overwrite `slot`.
    ///
    /// Only a fetch older than the last applied write is refused. A
    /// mutation response is always applied. With `discard_stale` off every
    /// response is accepted, restoring "last response wins".
    pub(crate) fn accept(
        &mut self,
        slot: Slot,
        seq: u64,
        write: Write,
        discard_stale: bool,
    ) -> bool {
        let entry = self.slot(slot);
        if discard_stale && write == Write::Fetch && seq < entry.committed {
            return false;
        }
        entry.committed = entry.committed.max(seq);
        true
    }
}
