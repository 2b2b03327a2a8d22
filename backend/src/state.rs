//! Application state container.
//!
//! A single explicit state object owned by the composition root and handed
//! to every service as a cloned [`Store`] handle. All mutations run under
//! one lock, so no two actions interleave mid-mutation, and every data
//! mutation is followed by a snapshot write to durable storage. Transient
//! UI state (navigation, selections, error banners) lives alongside the
//! data but is excluded from the persisted snapshot.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::storage::SnapshotStorage;
use shared::{
    ActiveMembership, Booking, Jamiya, Notification, Screen, Transaction, User,
};

/// The domain collections. Entities are never removed; cancellation and
/// expiry are status transitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub users: Vec<User>,
    pub jamiyas: Vec<Jamiya>,
    pub bookings: Vec<Booking>,
    pub active_memberships: Vec<ActiveMembership>,
    pub transactions: Vec<Transaction>,
    pub notifications: Vec<Notification>,
}

/// Who is logged in, plus the single transient error/success message pair
/// consumed and cleared by the UI.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub current_user_id: Option<String>,
    pub is_authenticated: bool,
    pub error: Option<String>,
    pub success_message: Option<String>,
}

/// Screen-navigation state machine plus the entity selections the booking
/// flow carries between screens.
#[derive(Debug, Clone)]
pub struct UiState {
    pub current_screen: Screen,
    pub previous_screen: Option<Screen>,
    pub selected_jamiya_id: Option<String>,
    pub selected_booking_id: Option<String>,
    pub is_loading: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_screen: Screen::Splash,
            previous_screen: None,
            selected_jamiya_id: None,
            selected_booking_id: None,
            is_loading: false,
        }
    }
}

/// Everything held behind the store lock.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub data: AppData,
    pub session: Session,
    pub ui: UiState,
}

/// The durable shape: domain collections and the session identity, without
/// the transient UI fields. One JSON document, no versioning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub jamiyas: Vec<Jamiya>,
    pub bookings: Vec<Booking>,
    pub active_memberships: Vec<ActiveMembership>,
    pub transactions: Vec<Transaction>,
    pub notifications: Vec<Notification>,
    pub current_user_id: Option<String>,
    pub is_authenticated: bool,
}

impl StoreState {
    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            users: self.data.users.clone(),
            jamiyas: self.data.jamiyas.clone(),
            bookings: self.data.bookings.clone(),
            active_memberships: self.data.active_memberships.clone(),
            transactions: self.data.transactions.clone(),
            notifications: self.data.notifications.clone(),
            current_user_id: self.session.current_user_id.clone(),
            is_authenticated: self.session.is_authenticated,
        }
    }

    fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            data: AppData {
                users: snapshot.users,
                jamiyas: snapshot.jamiyas,
                bookings: snapshot.bookings,
                active_memberships: snapshot.active_memberships,
                transactions: snapshot.transactions,
                notifications: snapshot.notifications,
            },
            session: Session {
                current_user_id: snapshot.current_user_id,
                is_authenticated: snapshot.is_authenticated,
                error: None,
                success_message: None,
            },
            ui: UiState::default(),
        }
    }
}

/// Shared handle to the application state. Cloning is cheap; all clones
/// refer to the same state and storage.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<StoreState>>,
    storage: Arc<dyn SnapshotStorage>,
}

impl Store {
    /// Open the store, rehydrating the whole snapshot if one exists.
    pub async fn open(storage: Arc<dyn SnapshotStorage>) -> Result<Self> {
        let state = match storage.load().await? {
            Some(snapshot) => StoreState::from_snapshot(snapshot),
            None => StoreState::default(),
        };
        Ok(Self {
            inner: Arc::new(Mutex::new(state)),
            storage,
        })
    }

    /// Read state under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        let state = self.inner.lock().expect("store lock poisoned");
        f(&state)
    }

    /// Mutate state under the lock, then persist the resulting snapshot.
    ///
    /// The closure runs to completion before the lock is released, so
    /// multi-entity mutations (e.g. booking confirmation) are atomic with
    /// respect to every other action.
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> Result<R> {
        let (result, snapshot) = {
            let mut state = self.inner.lock().expect("store lock poisoned");
            let result = f(&mut state);
            (result, state.to_snapshot())
        };
        self.storage.save(&snapshot).await?;
        Ok(result)
    }

    /// Mutate transient state (session messages, navigation, selections)
    /// without writing a snapshot.
    pub fn update<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.inner.lock().expect("store lock poisoned");
        f(&mut state)
    }

    /// Replace all domain collections, e.g. with seed data or nothing.
    /// The session is cleared as well.
    pub async fn reset(&self, data: AppData) -> Result<()> {
        self.mutate(|state| {
            state.data = data;
            state.session = Session::default();
            state.ui = UiState::default();
        })
        .await
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read(StoreState::to_snapshot)
    }

    /// The logged-in user's record, if any.
    pub fn current_user(&self) -> Option<User> {
        self.read(|state| {
            let id = state.session.current_user_id.as_deref()?;
            state.data.users.iter().find(|u| u.id == id).cloned()
        })
    }
}
