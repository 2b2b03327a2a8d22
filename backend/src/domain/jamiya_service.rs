use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::domain::commands::jamiya::CreateJamiyaCommand;
use crate::domain::notification_service::push_notification;
use crate::state::Store;
use shared::{Jamiya, JamiyaMember, JamiyaStatus, NotificationKind};

/// Defaults applied when the creation form leaves fields blank.
const DEFAULT_MONTHLY_AMOUNT: f64 = 10000.0;
const DEFAULT_DURATION: u32 = 6;
const DEFAULT_MAX_MEMBERS: u32 = 6;

/// Catalog and creation of savings groups.
#[derive(Clone)]
pub struct JamiyaService {
    store: Store,
}

impl JamiyaService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Jamiyas open for joining: status open or guarantee-month with a free
    /// seat. Pure filter, recomputed on every call.
    pub fn available_jamiyas(&self) -> Vec<Jamiya> {
        self.store.read(|state| {
            state
                .data
                .jamiyas
                .iter()
                .filter(|j| j.is_joinable())
                .cloned()
                .collect()
        })
    }

    pub fn jamiya_by_id(&self, jamiya_id: &str) -> Option<Jamiya> {
        self.store.read(|state| {
            state
                .data
                .jamiyas
                .iter()
                .find(|j| j.id == jamiya_id)
                .cloned()
        })
    }

    /// Jamiyas the user appears in as a member, whatever the status.
    pub fn user_jamiyas(&self, user_id: &str) -> Vec<Jamiya> {
        self.store.read(|state| {
            state
                .data
                .jamiyas
                .iter()
                .filter(|j| j.members.iter().any(|m| m.user_id == user_id))
                .cloned()
                .collect()
        })
    }

    /// Create a jamiya with the current user as its first member.
    ///
    /// The new group always starts under review with the creator at queue
    /// position 1. Returns `None` without a session. No field-range
    /// validation happens here; that lives in the UI layer.
    pub async fn create_jamiya(&self, command: CreateJamiyaCommand) -> Result<Option<Jamiya>> {
        let Some(creator) = self.store.current_user() else {
            return Ok(None);
        };

        let now = Utc::now();
        let max_members = command.max_members.unwrap_or(DEFAULT_MAX_MEMBERS);
        let jamiya = Jamiya {
            id: Jamiya::generate_id(now.timestamp_millis()),
            name: command.name.unwrap_or_else(|| "New jamiya".to_string()),
            monthly_amount: command.monthly_amount.unwrap_or(DEFAULT_MONTHLY_AMOUNT),
            duration: command.duration.unwrap_or(DEFAULT_DURATION),
            max_members,
            current_members: 1,
            status: JamiyaStatus::UnderReview,
            current_cycle: 0,
            income_level: command.income_level.unwrap_or(creator.income_level),
            progress: ((1.0 / max_members as f64) * 100.0).round() as u32,
            description: command
                .description
                .unwrap_or_else(|| "Jamiya under review".to_string()),
            created_at: now,
            members: vec![JamiyaMember {
                user_id: creator.id.clone(),
                user_name: creator.full_name.clone(),
                position: 1,
                has_received: false,
                received_at: None,
                is_current_receiver: false,
            }],
        };

        info!(jamiya_id = %jamiya.id, name = %jamiya.name, "Creating jamiya");

        let created = jamiya.clone();
        self.store
            .mutate(move |state| {
                let message = format!(
                    "Your jamiya \"{}\" was created and is now under review",
                    jamiya.name
                );
                push_notification(
                    &mut state.data,
                    &creator.id,
                    "Jamiya created",
                    message,
                    NotificationKind::Success,
                );
                state.data.jamiyas.push(jamiya);
            })
            .await?;

        Ok(Some(created))
    }
}
