use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One-time activation fee charged when reserving a seat in a jamiya (DZD).
pub const ACTIVATION_FEE: f64 = 2000.0;

/// How long a pending booking stays reservable before it expires.
pub const BOOKING_EXPIRY_HOURS: i64 = 48;

/// Length of one contribution cycle in days.
pub const PAYMENT_CYCLE_DAYS: i64 = 30;

/// Fixed demo OTP code; there is no per-user code generation.
pub const DEMO_OTP_CODE: &str = "123456";

/// KYC verification progress. Transitions are one-directional:
/// unverified -> pending -> verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Unverified,
    Pending,
    Verified,
}

/// Income bracket used to match users with jamiyas of a fitting
/// contribution size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Jamiya lifecycle. Moves forward only; there is no defined reverse
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JamiyaStatus {
    UnderReview,
    Open,
    GuaranteeMonth,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Expired,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Ledger entry type. Contributions and fees debit the user, receiving and
/// refunds credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Contribution,
    Receiving,
    Fee,
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    /// Postal current account (compte courant postal).
    Ccp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Screen identifiers driving the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Splash,
    Login,
    Register,
    Otp,
    Kyc,
    Dashboard,
    JamiyaDetails,
    Booking,
    Payment,
    PaymentSuccess,
    PostOffice,
    ActiveMembership,
    PaymentScreen,
    Transactions,
    Notifications,
    Profile,
    Completion,
    Success,
    Error,
    CreateJamiya,
}

/// User ID in format: "user_<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Phone number, the login credential (unique by convention only)
    pub phone: String,
    pub email: String,
    /// Plaintext password, demo-only; compared byte-for-byte at login
    pub password: String,
    pub full_name: String,
    pub income_level: IncomeLevel,
    pub kyc_status: KycStatus,
    /// Uploaded ID card encoding, present once KYC documents are submitted
    pub id_card_image: Option<String>,
    pub selfie_image: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Mirrors `kyc_status == Verified`
    pub is_verified: bool,
}

/// A rotating savings group: members contribute `monthly_amount` each cycle
/// and take turns receiving the pooled total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jamiya {
    pub id: String,
    pub name: String,
    pub monthly_amount: f64,
    /// Number of cycles (months); equals the seat count of a full rotation
    pub duration: u32,
    pub max_members: u32,
    pub current_members: u32,
    pub status: JamiyaStatus,
    pub current_cycle: u32,
    pub income_level: IncomeLevel,
    /// Fill percentage 0-100; maintained by mutators, not recomputed
    pub progress: u32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Ordered by payout position
    pub members: Vec<JamiyaMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JamiyaMember {
    pub user_id: String,
    pub user_name: String,
    /// Payout queue position, starting at 1
    pub position: u32,
    pub has_received: bool,
    pub received_at: Option<DateTime<Utc>>,
    pub is_current_receiver: bool,
}

/// Seat reservation made before a membership exists. Expires 48 hours after
/// creation unless confirmed at a post office first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub jamiya_id: String,
    pub jamiya_name: String,
    pub status: BookingStatus,
    pub activation_fee: f64,
    pub payment_method: PaymentMethod,
    /// Postal confirmation number, set when the booking is confirmed
    pub post_office_number: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Always `created_at` + 48h; only enforced while status is Pending
    pub expires_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

/// Created only when a booking is confirmed; the user's live seat in a
/// jamiya rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveMembership {
    pub id: String,
    pub user_id: String,
    pub jamiya_id: String,
    pub jamiya_name: String,
    pub monthly_amount: f64,
    pub position: u32,
    pub current_cycle: u32,
    pub total_cycles: u32,
    pub next_payment_date: DateTime<Utc>,
    pub current_receiver_name: String,
    pub is_current_receiver: bool,
    pub has_paid_this_cycle: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub jamiya_id: Option<String>,
    pub jamiya_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub status: PaymentStatus,
    pub date: DateTime<Utc>,
    pub description: String,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Generate an entity ID from a prefix and creation timestamp.
///
/// Uniqueness is best effort only: two entities created in the same
/// millisecond collide.
pub fn generate_id(prefix: &str, epoch_millis: i64) -> String {
    format!("{}_{}", prefix, epoch_millis)
}

/// Parse an entity ID, checking the prefix and extracting the timestamp.
pub fn parse_id(prefix: &str, id: &str) -> Result<i64, EntityIdError> {
    let Some(rest) = id.strip_prefix(prefix) else {
        return Err(EntityIdError::InvalidPrefix);
    };
    let Some(millis) = rest.strip_prefix('_') else {
        return Err(EntityIdError::InvalidFormat);
    };
    millis
        .parse::<i64>()
        .map_err(|_| EntityIdError::InvalidTimestamp)
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityIdError {
    InvalidPrefix,
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for EntityIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityIdError::InvalidPrefix => write!(f, "Entity ID has the wrong prefix"),
            EntityIdError::InvalidFormat => write!(f, "Invalid entity ID format"),
            EntityIdError::InvalidTimestamp => write!(f, "Invalid timestamp in entity ID"),
        }
    }
}

impl std::error::Error for EntityIdError {}

impl User {
    pub fn generate_id(epoch_millis: i64) -> String {
        generate_id("user", epoch_millis)
    }
}

impl Jamiya {
    pub fn generate_id(epoch_millis: i64) -> String {
        generate_id("jamiya", epoch_millis)
    }

    /// Whether the jamiya is currently accepting new members.
    pub fn is_joinable(&self) -> bool {
        matches!(
            self.status,
            JamiyaStatus::Open | JamiyaStatus::GuaranteeMonth
        ) && self.current_members < self.max_members
    }
}

impl Booking {
    pub fn generate_id(epoch_millis: i64) -> String {
        generate_id("booking", epoch_millis)
    }

    /// A booking is only subject to expiry while it is still pending.
    pub fn is_expirable_at(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::Pending && self.expires_at < now
    }
}

impl ActiveMembership {
    pub fn generate_id(epoch_millis: i64) -> String {
        generate_id("membership", epoch_millis)
    }
}

impl Transaction {
    pub fn generate_id(epoch_millis: i64) -> String {
        generate_id("trans", epoch_millis)
    }

    pub fn extract_timestamp(&self) -> Result<i64, EntityIdError> {
        parse_id("trans", &self.id)
    }
}

impl Notification {
    pub fn generate_id(epoch_millis: i64) -> String {
        generate_id("notif", epoch_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_generate_and_parse_id() {
        let id = generate_id("booking", 1702516122000);
        assert_eq!(id, "booking_1702516122000");
        assert_eq!(parse_id("booking", &id).unwrap(), 1702516122000);
    }

    #[test]
    fn test_parse_id_rejects_bad_input() {
        assert_eq!(
            parse_id("booking", "user_1702516122000"),
            Err(EntityIdError::InvalidPrefix)
        );
        assert_eq!(
            parse_id("booking", "booking-1702516122000"),
            Err(EntityIdError::InvalidFormat)
        );
        assert_eq!(
            parse_id("booking", "booking_not_a_number"),
            Err(EntityIdError::InvalidTimestamp)
        );
    }

    #[test]
    fn test_status_serialization_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&JamiyaStatus::GuaranteeMonth).unwrap(),
            "\"guarantee_month\""
        );
        assert_eq!(
            serde_json::to_string(&IncomeLevel::VeryHigh).unwrap(),
            "\"very_high\""
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&Screen::CreateJamiya).unwrap(),
            "\"create_jamiya\""
        );
    }

    #[test]
    fn test_transaction_kind_serializes_under_type_key() {
        let tx = Transaction {
            id: Transaction::generate_id(1702516122000),
            user_id: "user_1".to_string(),
            jamiya_id: None,
            jamiya_name: None,
            kind: TransactionKind::Contribution,
            amount: 10000.0,
            status: PaymentStatus::Completed,
            date: Utc::now(),
            description: "Monthly contribution".to_string(),
            receipt_url: None,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "contribution");
    }

    #[test]
    fn test_jamiya_is_joinable() {
        let mut jamiya = Jamiya {
            id: Jamiya::generate_id(1702516122000),
            name: "Test".to_string(),
            monthly_amount: 10000.0,
            duration: 6,
            max_members: 6,
            current_members: 3,
            status: JamiyaStatus::Open,
            current_cycle: 0,
            income_level: IncomeLevel::Medium,
            progress: 50,
            description: String::new(),
            created_at: Utc::now(),
            members: vec![],
        };
        assert!(jamiya.is_joinable());

        jamiya.status = JamiyaStatus::GuaranteeMonth;
        assert!(jamiya.is_joinable());

        jamiya.status = JamiyaStatus::Active;
        assert!(!jamiya.is_joinable());

        jamiya.status = JamiyaStatus::Open;
        jamiya.current_members = 6;
        assert!(!jamiya.is_joinable());
    }

    #[test]
    fn test_booking_expirable_only_while_pending() {
        let created = Utc::now() - Duration::hours(72);
        let mut booking = Booking {
            id: Booking::generate_id(1702516122000),
            user_id: "user_1".to_string(),
            jamiya_id: "jamiya_1".to_string(),
            jamiya_name: "Test".to_string(),
            status: BookingStatus::Pending,
            activation_fee: ACTIVATION_FEE,
            payment_method: PaymentMethod::Ccp,
            post_office_number: None,
            created_at: created,
            expires_at: created + Duration::hours(BOOKING_EXPIRY_HOURS),
            verified_at: None,
        };
        assert!(booking.is_expirable_at(Utc::now()));

        booking.status = BookingStatus::Confirmed;
        assert!(!booking.is_expirable_at(Utc::now()));
    }

    #[test]
    fn test_entity_round_trips_through_json() {
        let user = User {
            id: User::generate_id(1702516122000),
            phone: "0551234567".to_string(),
            email: "amina@example.dz".to_string(),
            password: "password123".to_string(),
            full_name: "Amina Cherif".to_string(),
            income_level: IncomeLevel::Medium,
            kyc_status: KycStatus::Pending,
            id_card_image: Some("data:image/png;base64,AAAA".to_string()),
            selfie_image: None,
            created_at: Utc::now(),
            is_verified: false,
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
