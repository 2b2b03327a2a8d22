//! # Jamiya Backend
//!
//! Non-UI logic for the jamiya savings-group application.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business rules for sessions, jamiyas, bookings, payments
//! - **State**: The in-memory store and its snapshot model
//! - **Storage**: Snapshot persistence (JSON file, in-memory)
//!
//! The backend is UI-agnostic: a mobile shell, a desktop frontend, or a
//! CLI can all drive it through [`AppState`] without modification.

pub mod domain;
pub mod seed;
pub mod state;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::domain::{
    BookingService, ExpiryQueue, ExpiryScheduler, JamiyaService, Navigator, NotificationService,
    PaymentService, SavingsService, SessionService, SimulatedNetwork, TransactionService,
};
use crate::state::Store;
use crate::storage::SnapshotStorage;

pub use state::{AppData, Session, Snapshot, StoreState, UiState};

/// Main application state that holds the store and all services.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub session_service: SessionService,
    pub jamiya_service: JamiyaService,
    pub booking_service: BookingService,
    pub payment_service: PaymentService,
    pub savings_service: SavingsService,
    pub transaction_service: TransactionService,
    pub notification_service: NotificationService,
    pub navigator: Navigator,
    pub network: SimulatedNetwork,
    pub expiry_queue: ExpiryQueue,
}

impl AppState {
    /// Drop everything and reload the demo data set. Also ends the session.
    pub async fn reset_to_seed_data(&self) -> Result<()> {
        info!("Resetting store to demo data");
        self.store.reset(seed::seed_data()).await
    }

    /// Wipe all collections and the session.
    pub async fn clear_all_data(&self) -> Result<()> {
        info!("Clearing all application data");
        self.store.reset(AppData::default()).await
    }
}

/// Initialize the backend with all required services.
///
/// Opens the store from the given storage, seeds the demo data when the
/// snapshot is empty, and registers every surviving pending booking with
/// the expiry queue so deadlines carry across restarts.
pub async fn initialize_backend(storage: Arc<dyn SnapshotStorage>) -> Result<AppState> {
    info!("Opening state store");
    let store = Store::open(storage).await?;

    if store.read(|state| state.data.users.is_empty()) {
        info!("Empty snapshot, loading demo data");
        store.reset(seed::seed_data()).await?;
    }

    info!("Setting up domain services");
    let expiry_queue = ExpiryQueue::new();
    let session_service = SessionService::new(store.clone());
    let jamiya_service = JamiyaService::new(store.clone());
    let booking_service = BookingService::new(store.clone(), expiry_queue.clone());
    let payment_service = PaymentService::new(store.clone());
    let savings_service = SavingsService::new(store.clone());
    let transaction_service = TransactionService::new(store.clone());
    let notification_service = NotificationService::new(store.clone());
    let navigator = Navigator::new(store.clone());
    let network = SimulatedNetwork::default();

    let pending = store.read(|state| {
        state
            .data
            .bookings
            .iter()
            .filter(|b| b.status == shared::BookingStatus::Pending)
            .map(|b| (b.expires_at, b.id.clone()))
            .collect::<Vec<_>>()
    });
    for (expires_at, booking_id) in pending {
        expiry_queue.schedule(booking_id, expires_at);
    }

    Ok(AppState {
        store,
        session_service,
        jamiya_service,
        booking_service,
        payment_service,
        savings_service,
        transaction_service,
        notification_service,
        navigator,
        network,
        expiry_queue,
    })
}

/// Spawn the booking-expiry scheduler on the current runtime.
pub fn spawn_expiry_scheduler(app_state: &AppState) -> tokio::task::JoinHandle<()> {
    let scheduler = ExpiryScheduler::new(
        app_state.expiry_queue.clone(),
        app_state.booking_service.clone(),
    );
    tokio::spawn(async move { scheduler.run().await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use shared::BookingStatus;

    #[tokio::test]
    async fn test_initialize_seeds_empty_store() {
        let app_state = initialize_backend(Arc::new(MemoryStorage::new()))
            .await
            .unwrap();

        let (users, jamiyas) = app_state
            .store
            .read(|state| (state.data.users.len(), state.data.jamiyas.len()));
        assert_eq!(users, 8);
        assert_eq!(jamiyas, 5);
    }

    #[tokio::test]
    async fn test_initialize_registers_pending_booking_deadlines() {
        let app_state = initialize_backend(Arc::new(MemoryStorage::new()))
            .await
            .unwrap();

        let pending = app_state.store.read(|state| {
            state
                .data
                .bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count()
        });
        assert!(pending > 0);
        assert!(app_state.expiry_queue.next_deadline().is_some());
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let first = initialize_backend(storage.clone()).await.unwrap();
        first
            .session_service
            .register_user(domain::commands::session::RegisterUserCommand {
                phone: "0559999999".to_string(),
                email: "new.user@example.dz".to_string(),
                password: "secret123".to_string(),
                full_name: "New User".to_string(),
                income_level: None,
            })
            .await
            .unwrap();

        let second = initialize_backend(storage).await.unwrap();
        let users = second.store.read(|state| state.data.users.len());
        assert_eq!(users, 9, "re-open must not re-seed over saved data");
    }

    #[tokio::test]
    async fn test_every_seeded_user_can_log_in() {
        let app_state = initialize_backend(Arc::new(MemoryStorage::new()))
            .await
            .unwrap();

        let users = app_state.store.read(|state| state.data.users.clone());
        for user in users {
            assert!(
                app_state
                    .session_service
                    .login(&user.phone, &user.password)
                    .await
                    .unwrap(),
                "seeded user {} failed to log in",
                user.id
            );
            app_state.session_service.logout().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_clear_and_reseed() {
        let app_state = initialize_backend(Arc::new(MemoryStorage::new()))
            .await
            .unwrap();

        app_state.clear_all_data().await.unwrap();
        assert!(app_state.store.read(|state| state.data.users.is_empty()));

        app_state.reset_to_seed_data().await.unwrap();
        assert_eq!(app_state.store.read(|state| state.data.users.len()), 8);
        assert!(!app_state.store.read(|state| state.session.is_authenticated));
    }
}
