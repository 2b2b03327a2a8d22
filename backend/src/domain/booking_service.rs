use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::domain::commands::booking::CreateBookingCommand;
use crate::domain::expiry::ExpiryQueue;
use crate::domain::notification_service::push_notification;
use crate::domain::verification;
use crate::state::Store;
use shared::{
    ActiveMembership, Booking, BookingStatus, JamiyaMember, NotificationKind, ACTIVATION_FEE,
    BOOKING_EXPIRY_HOURS, PAYMENT_CYCLE_DAYS,
};

/// Booking lifecycle: pending -> confirmed | expired | cancelled.
///
/// Confirmation is the only path that creates an [`ActiveMembership`] and
/// grows the jamiya's member list; both happen inside one locked mutation
/// so the member count can never drift from the list length.
#[derive(Clone)]
pub struct BookingService {
    store: Store,
    expiry: ExpiryQueue,
}

impl BookingService {
    pub fn new(store: Store, expiry: ExpiryQueue) -> Self {
        Self { store, expiry }
    }

    /// Reserve a seat in a jamiya for the current user.
    ///
    /// Rejected with a session error if the user already has a pending
    /// booking; returns `None` without a session or for an unknown jamiya.
    /// The new booking becomes the session's selected booking for the
    /// screens that follow.
    pub async fn create_booking(&self, command: CreateBookingCommand) -> Result<Option<Booking>> {
        let Some(user) = self.store.current_user() else {
            return Ok(None);
        };

        let created = self
            .store
            .mutate(move |state| {
                let Some(jamiya) = state
                    .data
                    .jamiyas
                    .iter()
                    .find(|j| j.id == command.jamiya_id)
                    .cloned()
                else {
                    return None;
                };

                let has_pending = state
                    .data
                    .bookings
                    .iter()
                    .any(|b| b.user_id == user.id && b.status == BookingStatus::Pending);
                if has_pending {
                    state.session.error = Some("You already have an active booking".to_string());
                    return None;
                }

                let now = Utc::now();
                let booking = Booking {
                    id: Booking::generate_id(now.timestamp_millis()),
                    user_id: user.id.clone(),
                    jamiya_id: jamiya.id.clone(),
                    jamiya_name: jamiya.name.clone(),
                    status: BookingStatus::Pending,
                    activation_fee: ACTIVATION_FEE,
                    payment_method: command.payment_method,
                    post_office_number: None,
                    created_at: now,
                    expires_at: now + Duration::hours(BOOKING_EXPIRY_HOURS),
                    verified_at: None,
                };

                push_notification(
                    &mut state.data,
                    &user.id,
                    "Booking created",
                    format!("Your booking in {} was created successfully", jamiya.name),
                    NotificationKind::Success,
                );
                state.ui.selected_booking_id = Some(booking.id.clone());
                state.data.bookings.push(booking.clone());
                Some(booking)
            })
            .await?;

        if let Some(booking) = &created {
            info!(booking_id = %booking.id, jamiya_id = %booking.jamiya_id, "Created booking");
            self.expiry.schedule(booking.id.clone(), booking.expires_at);
        }
        Ok(created)
    }

    /// Confirm the session's selected booking with a postal confirmation
    /// number.
    ///
    /// An invalid number sets the session error and mutates nothing. On
    /// success the booking, the new membership, and the jamiya's member
    /// list are all updated in one atomic mutation.
    pub async fn confirm_booking(&self, post_office_number: &str) -> Result<bool> {
        let Some(user) = self.store.current_user() else {
            return Ok(false);
        };

        if !verification::is_valid_post_office_number(post_office_number) {
            warn!("Rejected invalid post office number");
            self.store.update(|state| {
                state.session.error = Some("Invalid post office number".to_string());
            });
            return Ok(false);
        }

        let number = post_office_number.to_string();
        let confirmed = self
            .store
            .mutate(move |state| {
                let Some(selected_id) = state.ui.selected_booking_id.clone() else {
                    return false;
                };

                let now = Utc::now();
                let Some(booking) = state
                    .data
                    .bookings
                    .iter_mut()
                    .find(|b| b.id == selected_id)
                else {
                    return false;
                };
                booking.status = BookingStatus::Confirmed;
                booking.post_office_number = Some(number);
                booking.verified_at = Some(now);
                let jamiya_id = booking.jamiya_id.clone();
                let jamiya_name = booking.jamiya_name.clone();

                if let Some(jamiya) = state
                    .data
                    .jamiyas
                    .iter()
                    .find(|j| j.id == jamiya_id)
                    .cloned()
                {
                    let position = jamiya.current_members + 1;
                    state.data.active_memberships.push(ActiveMembership {
                        id: ActiveMembership::generate_id(now.timestamp_millis()),
                        user_id: user.id.clone(),
                        jamiya_id: jamiya.id.clone(),
                        jamiya_name: jamiya.name.clone(),
                        monthly_amount: jamiya.monthly_amount,
                        position,
                        current_cycle: jamiya.current_cycle,
                        total_cycles: jamiya.duration,
                        next_payment_date: now + Duration::days(PAYMENT_CYCLE_DAYS),
                        current_receiver_name: "Guarantee month".to_string(),
                        is_current_receiver: false,
                        has_paid_this_cycle: false,
                    });

                    if let Some(jamiya) =
                        state.data.jamiyas.iter_mut().find(|j| j.id == jamiya_id)
                    {
                        jamiya.current_members += 1;
                        jamiya.members.push(JamiyaMember {
                            user_id: user.id.clone(),
                            user_name: user.full_name.clone(),
                            position,
                            has_received: false,
                            received_at: None,
                            is_current_receiver: false,
                        });
                    }
                }

                push_notification(
                    &mut state.data,
                    &user.id,
                    "Booking confirmed",
                    format!("Your booking in {} was confirmed successfully", jamiya_name),
                    NotificationKind::Success,
                );
                true
            })
            .await?;

        if confirmed {
            info!("Confirmed selected booking");
        }
        Ok(confirmed)
    }

    /// Set a booking's status to cancelled. No side effects to reverse:
    /// membership only exists after confirmation.
    pub async fn cancel_booking(&self, booking_id: &str) -> Result<()> {
        info!(%booking_id, "Cancelling booking");
        self.store
            .mutate(|state| {
                if let Some(booking) = state
                    .data
                    .bookings
                    .iter_mut()
                    .find(|b| b.id == booking_id)
                {
                    booking.status = BookingStatus::Cancelled;
                }
            })
            .await
    }

    pub fn user_bookings(&self, user_id: &str) -> Vec<Booking> {
        self.store.read(|state| {
            state
                .data
                .bookings
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect()
        })
    }

    /// Flip every pending booking past its expiry to expired and notify the
    /// owner. Idempotent; non-pending bookings are never touched.
    pub async fn expire_due_bookings(&self, now: DateTime<Utc>) -> Result<usize> {
        self.store
            .mutate(move |state| {
                let due: Vec<usize> = state
                    .data
                    .bookings
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| b.is_expirable_at(now))
                    .map(|(i, _)| i)
                    .collect();

                for &index in &due {
                    let (user_id, jamiya_name) = {
                        let booking = &mut state.data.bookings[index];
                        booking.status = BookingStatus::Expired;
                        (booking.user_id.clone(), booking.jamiya_name.clone())
                    };
                    push_notification(
                        &mut state.data,
                        &user_id,
                        "Booking expired",
                        format!("Unfortunately, your booking in {jamiya_name} has expired"),
                        NotificationKind::Error,
                    );
                }
                due.len()
            })
            .await
    }
}
