use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::commands::session::{KycDocumentsCommand, RegisterUserCommand};
use crate::domain::verification;
use crate::state::Store;
use shared::{IncomeLevel, KycStatus, Screen, User};

/// Session and identity: login, registration, OTP, and KYC progression.
///
/// Authentication is demo-grade by design: passwords are plaintext and
/// compared byte-for-byte, and there is no lockout, rate limiting, or
/// audit trail. Failures surface through the session's single error
/// message field.
#[derive(Clone)]
pub struct SessionService {
    store: Store,
}

impl SessionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Log in with phone + password. Succeeds iff both fields of one user
    /// record match exactly; no normalization is applied here.
    pub async fn login(&self, phone: &str, password: &str) -> Result<bool> {
        let matched = self
            .store
            .mutate(|state| {
                let user = state
                    .data
                    .users
                    .iter()
                    .find(|u| u.phone == phone && u.password == password)
                    .cloned();
                match user {
                    Some(user) => {
                        state.session.current_user_id = Some(user.id.clone());
                        state.session.is_authenticated = true;
                        state.session.error = None;
                        true
                    }
                    None => {
                        state.session.error =
                            Some("Invalid phone number or password".to_string());
                        false
                    }
                }
            })
            .await?;

        if matched {
            info!(%phone, "Login succeeded");
        } else {
            warn!(%phone, "Login failed");
        }
        Ok(matched)
    }

    /// Clear the session and send navigation back to the login screen.
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");
        self.store
            .mutate(|state| {
                state.session.current_user_id = None;
                state.session.is_authenticated = false;
                state.session.error = None;
                state.session.success_message = None;
                state.ui.current_screen = Screen::Login;
                state.ui.previous_screen = None;
                state.ui.selected_jamiya_id = None;
                state.ui.selected_booking_id = None;
            })
            .await
    }

    /// Create a new account and immediately establish a session.
    ///
    /// Always succeeds; there is no duplicate-phone check.
    pub async fn register_user(&self, command: RegisterUserCommand) -> Result<User> {
        info!(phone = %command.phone, "Registering user");

        let now = Utc::now();
        let user = User {
            id: User::generate_id(now.timestamp_millis()),
            phone: command.phone,
            email: command.email,
            password: command.password,
            full_name: command.full_name,
            income_level: command.income_level.unwrap_or(IncomeLevel::Medium),
            kyc_status: KycStatus::Unverified,
            id_card_image: None,
            selfie_image: None,
            created_at: now,
            is_verified: false,
        };

        let registered = user.clone();
        self.store
            .mutate(move |state| {
                state.session.current_user_id = Some(user.id.clone());
                state.session.is_authenticated = true;
                state.data.users.push(user);
            })
            .await?;

        info!(user_id = %registered.id, "Registered user");
        Ok(registered)
    }

    /// Check an OTP code. Pure equality against the fixed demo code; a
    /// mismatch writes the session error.
    pub fn verify_otp(&self, code: &str) -> bool {
        if verification::is_valid_otp(code) {
            true
        } else {
            warn!("OTP verification failed");
            self.store.update(|state| {
                state.session.error = Some("Incorrect verification code".to_string());
            });
            false
        }
    }

    /// Store the uploaded KYC documents on the current user and advance
    /// their status to pending review. Returns false without a session.
    pub async fn update_kyc(&self, command: KycDocumentsCommand) -> Result<bool> {
        let Some(current) = self.store.current_user() else {
            return Ok(false);
        };
        info!(user_id = %current.id, "Submitting KYC documents");

        self.store
            .mutate(|state| {
                if let Some(user) = state.data.users.iter_mut().find(|u| u.id == current.id) {
                    user.id_card_image = Some(command.id_card_image);
                    user.selfie_image = Some(command.selfie_image);
                    user.kyc_status = KycStatus::Pending;
                }
            })
            .await?;
        Ok(true)
    }

    /// Advance a user straight to verified. Not reachable from any screen
    /// yet, but part of the store surface.
    pub async fn approve_kyc(&self, user_id: &str) -> Result<bool> {
        info!(%user_id, "Approving KYC");
        self.store
            .mutate(|state| {
                match state.data.users.iter_mut().find(|u| u.id == user_id) {
                    Some(user) => {
                        user.kyc_status = KycStatus::Verified;
                        user.is_verified = true;
                        true
                    }
                    None => false,
                }
            })
            .await
    }

    /// Clear the transient error/success message pair after the UI has
    /// shown it.
    pub fn clear_messages(&self) {
        self.store.update(|state| {
            state.session.error = None;
            state.session.success_message = None;
        });
    }
}
