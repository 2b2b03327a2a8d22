use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::info;

use crate::domain::notification_service::push_notification;
use crate::state::Store;
use shared::{
    ActiveMembership, NotificationKind, PaymentStatus, Transaction, TransactionKind,
    PAYMENT_CYCLE_DAYS,
};

/// Monthly contribution payments against an active membership.
///
/// Paying records a completed contribution in the ledger, marks the cycle
/// paid, and pushes the next payment date out a cycle. There is no
/// idempotence guard: paying twice in the same cycle records two
/// contributions. The payout side of the rotation (advancing the cycle,
/// moving the receiver) is not modeled.
#[derive(Clone)]
pub struct PaymentService {
    store: Store,
}

impl PaymentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn user_active_memberships(&self, user_id: &str) -> Vec<ActiveMembership> {
        self.store.read(|state| {
            state
                .data
                .active_memberships
                .iter()
                .filter(|m| m.user_id == user_id)
                .cloned()
                .collect()
        })
    }

    /// Pay the monthly contribution for a membership. Requires a session;
    /// returns `None` without one or for an unknown membership.
    pub async fn make_payment(&self, membership_id: &str) -> Result<Option<Transaction>> {
        let Some(user) = self.store.current_user() else {
            return Ok(None);
        };

        let membership_id = membership_id.to_string();
        let transaction = self
            .store
            .mutate(move |state| {
                let Some(membership) = state
                    .data
                    .active_memberships
                    .iter_mut()
                    .find(|m| m.id == membership_id)
                else {
                    return None;
                };

                let now = Utc::now();
                membership.has_paid_this_cycle = true;
                membership.next_payment_date = now + Duration::days(PAYMENT_CYCLE_DAYS);
                let amount = membership.monthly_amount;
                let jamiya_id = membership.jamiya_id.clone();
                let jamiya_name = membership.jamiya_name.clone();

                let transaction = Transaction {
                    id: Transaction::generate_id(now.timestamp_millis()),
                    user_id: user.id.clone(),
                    jamiya_id: Some(jamiya_id),
                    jamiya_name: Some(jamiya_name.clone()),
                    kind: TransactionKind::Contribution,
                    amount,
                    status: PaymentStatus::Completed,
                    date: now,
                    description: format!("Monthly contribution - {jamiya_name}"),
                    receipt_url: Some("#".to_string()),
                };
                state.data.transactions.push(transaction.clone());

                push_notification(
                    &mut state.data,
                    &user.id,
                    "Payment successful",
                    format!("Paid {amount} DZD to {jamiya_name}"),
                    NotificationKind::Success,
                );
                Some(transaction)
            })
            .await?;

        if let Some(tx) = &transaction {
            info!(transaction_id = %tx.id, amount = tx.amount, "Recorded contribution payment");
        }
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::session::RegisterUserCommand;
    use crate::domain::savings_service::SavingsService;
    use crate::domain::session_service::SessionService;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    async fn setup_test() -> (PaymentService, SessionService, SavingsService, Store) {
        let store = Store::open(Arc::new(MemoryStorage::new()))
            .await
            .expect("Failed to open test store");
        (
            PaymentService::new(store.clone()),
            SessionService::new(store.clone()),
            SavingsService::new(store.clone()),
            store,
        )
    }

    async fn login_test_user(sessions: &SessionService) -> shared::User {
        sessions
            .register_user(RegisterUserCommand {
                phone: "0551234567".to_string(),
                email: "user@example.dz".to_string(),
                password: "password123".to_string(),
                full_name: "Test User".to_string(),
                income_level: None,
            })
            .await
            .expect("Failed to register test user")
    }

    async fn insert_membership(store: &Store, user_id: &str, amount: f64) -> ActiveMembership {
        let membership = ActiveMembership {
            id: "membership_1".to_string(),
            user_id: user_id.to_string(),
            jamiya_id: "jamiya_1".to_string(),
            jamiya_name: "Families of El Biar".to_string(),
            monthly_amount: amount,
            position: 2,
            current_cycle: 1,
            total_cycles: 6,
            next_payment_date: Utc::now(),
            current_receiver_name: "Ahmed Benali".to_string(),
            is_current_receiver: false,
            has_paid_this_cycle: false,
        };
        let inserted = membership.clone();
        store
            .mutate(move |state| state.data.active_memberships.push(membership))
            .await
            .expect("Failed to insert membership");
        inserted
    }

    #[tokio::test]
    async fn test_make_payment_records_contribution_and_marks_cycle() {
        let (payments, sessions, savings, store) = setup_test().await;
        let user = login_test_user(&sessions).await;
        insert_membership(&store, &user.id, 12000.0).await;

        let tx = payments
            .make_payment("membership_1")
            .await
            .unwrap()
            .expect("payment should succeed");

        assert_eq!(tx.kind, TransactionKind::Contribution);
        assert_eq!(tx.amount, 12000.0);
        assert_eq!(tx.status, PaymentStatus::Completed);
        assert_eq!(tx.jamiya_id.as_deref(), Some("jamiya_1"));

        let membership = payments.user_active_memberships(&user.id)[0].clone();
        assert!(membership.has_paid_this_cycle);
        assert!(membership.next_payment_date > Utc::now() + Duration::days(29));

        assert_eq!(savings.total_savings(&user.id), 12000.0);
    }

    #[tokio::test]
    async fn test_double_payment_has_no_idempotence_guard() {
        let (payments, sessions, savings, store) = setup_test().await;
        let user = login_test_user(&sessions).await;
        insert_membership(&store, &user.id, 12000.0).await;

        payments.make_payment("membership_1").await.unwrap().unwrap();
        payments.make_payment("membership_1").await.unwrap().unwrap();

        // Two ledger entries, double the savings
        assert_eq!(store.read(|s| s.data.transactions.len()), 2);
        assert_eq!(savings.total_savings(&user.id), 24000.0);
    }

    #[tokio::test]
    async fn test_payment_requires_session_and_known_membership() {
        let (payments, sessions, _savings, store) = setup_test().await;

        assert!(payments.make_payment("membership_1").await.unwrap().is_none());

        let user = login_test_user(&sessions).await;
        insert_membership(&store, &user.id, 12000.0).await;
        assert!(payments.make_payment("membership_missing").await.unwrap().is_none());
        assert!(store.read(|s| s.data.transactions.is_empty()));
    }

    #[tokio::test]
    async fn test_payment_emits_success_notification() {
        let (payments, sessions, _savings, store) = setup_test().await;
        let user = login_test_user(&sessions).await;
        insert_membership(&store, &user.id, 12000.0).await;

        payments.make_payment("membership_1").await.unwrap().unwrap();
        let notified = store.read(|s| {
            s.data
                .notifications
                .iter()
                .any(|n| n.user_id == user.id && n.kind == NotificationKind::Success)
        });
        assert!(notified);
    }
}
