//! # Domain Module
//!
//! Business logic for the jamiya application: session and identity, the
//! savings-group catalog, the booking lifecycle with its expiry
//! scheduling, contribution payments with the savings projection, the
//! transaction and notification read sides, and the screen-navigation
//! state machine.
//!
//! Every service holds a cloned [`crate::state::Store`] handle injected by
//! the composition root; none of them owns global state. Infrastructure
//! failures propagate as `anyhow::Result`, business-rule rejections return
//! `false`/`None` and write the session's error message.

pub mod booking_service;
pub mod commands;
pub mod expiry;
pub mod jamiya_service;
pub mod navigation;
pub mod network;
pub mod notification_service;
pub mod payment_service;
pub mod savings_service;
pub mod session_service;
pub mod transaction_service;
pub mod verification;

pub use booking_service::BookingService;
pub use expiry::{ExpiryQueue, ExpiryScheduler};
pub use jamiya_service::JamiyaService;
pub use navigation::Navigator;
pub use network::{CancelToken, Cancelled, SimulatedNetwork};
pub use notification_service::NotificationService;
pub use payment_service::PaymentService;
pub use savings_service::SavingsService;
pub use session_service::SessionService;
pub use transaction_service::TransactionService;
