use crate::state::Store;
use shared::{PaymentStatus, TransactionKind};

/// Savings as a projection over the ledger.
///
/// The transaction history is the single source of truth; nothing
/// maintains a running counter, so the total can never drift from the
/// entries that back it.
#[derive(Clone)]
pub struct SavingsService {
    store: Store,
}

impl SavingsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Sum of the user's completed contribution payments.
    pub fn total_savings(&self, user_id: &str) -> f64 {
        self.store.read(|state| {
            state
                .data
                .transactions
                .iter()
                .filter(|t| {
                    t.user_id == user_id
                        && t.kind == TransactionKind::Contribution
                        && t.status == PaymentStatus::Completed
                })
                .map(|t| t.amount)
                .sum()
        })
    }
}
