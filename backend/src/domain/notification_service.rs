use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::domain::commands::notification::AddNotificationCommand;
use crate::state::{AppData, Store};
use shared::{Notification, NotificationKind};

/// Append a notification to the collections inside an already-running
/// mutation. Every mutating service emits through here so the notification
/// lands in the same atomic state change as the action it reports.
pub(crate) fn push_notification(
    data: &mut AppData,
    user_id: &str,
    title: &str,
    message: String,
    kind: NotificationKind,
) -> Notification {
    let now = Utc::now();
    let notification = Notification {
        id: Notification::generate_id(now.timestamp_millis()),
        user_id: user_id.to_string(),
        title: title.to_string(),
        message,
        kind,
        is_read: false,
        created_at: now,
    };
    data.notifications.insert(0, notification.clone());
    notification
}

/// Read side and flag management for per-user notifications.
#[derive(Clone)]
pub struct NotificationService {
    store: Store,
}

impl NotificationService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All of a user's notifications, newest first. Re-sorted on every
    /// call; no backing order is maintained.
    pub fn user_notifications(&self, user_id: &str) -> Vec<Notification> {
        self.store.read(|state| {
            let mut notifications: Vec<Notification> = state
                .data
                .notifications
                .iter()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect();
            notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            notifications
        })
    }

    pub fn unread_notifications(&self, user_id: &str) -> Vec<Notification> {
        self.user_notifications(user_id)
            .into_iter()
            .filter(|n| !n.is_read)
            .collect()
    }

    /// Flip a single read flag. Returns false if the notification does not
    /// exist.
    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<bool> {
        self.store
            .mutate(|state| {
                match state
                    .data
                    .notifications
                    .iter_mut()
                    .find(|n| n.id == notification_id)
                {
                    Some(notification) => {
                        notification.is_read = true;
                        true
                    }
                    None => false,
                }
            })
            .await
    }

    /// Mark every notification of a user read. Returns how many flags were
    /// flipped.
    pub async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        self.store
            .mutate(|state| {
                let mut flipped = 0;
                for notification in state
                    .data
                    .notifications
                    .iter_mut()
                    .filter(|n| n.user_id == user_id && !n.is_read)
                {
                    notification.is_read = true;
                    flipped += 1;
                }
                flipped
            })
            .await
    }

    /// Emit a standalone notification outside any other action.
    pub async fn add_notification(&self, command: AddNotificationCommand) -> Result<Notification> {
        info!(user_id = %command.user_id, title = %command.title, "Adding notification");
        self.store
            .mutate(|state| {
                push_notification(
                    &mut state.data,
                    &command.user_id,
                    &command.title,
                    command.message,
                    command.kind,
                )
            })
            .await
    }
}
