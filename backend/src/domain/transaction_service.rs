use crate::state::Store;
use shared::{Transaction, TransactionKind};

/// Read side of the transaction ledger. Results are filtered and re-sorted
/// by descending date on every call; no stable backing order is kept.
#[derive(Clone)]
pub struct TransactionService {
    store: Store,
}

impl TransactionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn user_transactions(&self, user_id: &str) -> Vec<Transaction> {
        self.store.read(|state| {
            let mut transactions: Vec<Transaction> = state
                .data
                .transactions
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect();
            transactions.sort_by(|a, b| b.date.cmp(&a.date));
            transactions
        })
    }

    pub fn transactions_by_kind(&self, user_id: &str, kind: TransactionKind) -> Vec<Transaction> {
        self.user_transactions(user_id)
            .into_iter()
            .filter(|t| t.kind == kind)
            .collect()
    }
}
