//! Demo fixture data.
//!
//! Seeds the collections with plausible cross-referenced entities: users
//! across all KYC states, jamiyas across the lifecycle, a pending and a
//! confirmed booking, an active membership with its ledger history, and a
//! few notifications. Loaded on first launch when the snapshot is empty.

use chrono::{Duration, Utc};

use crate::state::AppData;
use shared::{
    ActiveMembership, Booking, BookingStatus, IncomeLevel, Jamiya, JamiyaMember, JamiyaStatus,
    KycStatus, Notification, NotificationKind, PaymentMethod, PaymentStatus, Transaction,
    TransactionKind, User, ACTIVATION_FEE, BOOKING_EXPIRY_HOURS,
};

fn user(
    id: &str,
    phone: &str,
    full_name: &str,
    email: &str,
    income_level: IncomeLevel,
    kyc_status: KycStatus,
    days_old: i64,
) -> User {
    User {
        id: id.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        full_name: full_name.to_string(),
        income_level,
        kyc_status,
        id_card_image: None,
        selfie_image: None,
        created_at: Utc::now() - Duration::days(days_old),
        is_verified: kyc_status == KycStatus::Verified,
    }
}

fn member(user: &User, position: u32, has_received: bool, is_current_receiver: bool) -> JamiyaMember {
    JamiyaMember {
        user_id: user.id.clone(),
        user_name: user.full_name.clone(),
        position,
        has_received,
        received_at: has_received.then(|| Utc::now() - Duration::days(30)),
        is_current_receiver,
    }
}

/// Build the full demo data set.
pub fn seed_data() -> AppData {
    let now = Utc::now();

    let users = vec![
        user("user_1", "0550123456", "Ahmed Benali", "ahmed.benali@example.dz", IncomeLevel::Medium, KycStatus::Verified, 90),
        user("user_2", "0551234567", "Fatima Zohra", "fatima.zohra@example.dz", IncomeLevel::High, KycStatus::Verified, 120),
        user("user_3", "0552345678", "Mohamed Larbi", "mohamed.larbi@example.dz", IncomeLevel::Low, KycStatus::Pending, 45),
        user("user_4", "0553456789", "Amina Cherif", "amina.cherif@example.dz", IncomeLevel::Medium, KycStatus::Unverified, 30),
        user("user_5", "0554567890", "Youcef Brahimi", "youcef.brahimi@example.dz", IncomeLevel::VeryHigh, KycStatus::Verified, 200),
        user("user_6", "0555678901", "Khadidja Mansouri", "khadidja.mansouri@example.dz", IncomeLevel::Medium, KycStatus::Pending, 60),
        user("user_7", "0556789012", "Karim Haddad", "karim.haddad@example.dz", IncomeLevel::Low, KycStatus::Unverified, 15),
        user("user_8", "0557890123", "Salima Boudiaf", "salima.boudiaf@example.dz", IncomeLevel::High, KycStatus::Verified, 150),
    ];

    let jamiyas = vec![
        Jamiya {
            id: "jamiya_1".to_string(),
            name: "Neighbors of Bab El Oued".to_string(),
            monthly_amount: 10000.0,
            duration: 6,
            max_members: 6,
            current_members: 3,
            status: JamiyaStatus::Open,
            current_cycle: 0,
            income_level: IncomeLevel::Medium,
            progress: 50,
            description: "Monthly circle for the neighborhood, first rotation".to_string(),
            created_at: now - Duration::days(20),
            members: vec![
                member(&users[1], 1, false, false),
                member(&users[2], 2, false, false),
                member(&users[5], 3, false, false),
            ],
        },
        Jamiya {
            id: "jamiya_2".to_string(),
            name: "Teachers of Oran".to_string(),
            monthly_amount: 20000.0,
            duration: 8,
            max_members: 8,
            current_members: 5,
            status: JamiyaStatus::Open,
            current_cycle: 0,
            income_level: IncomeLevel::High,
            progress: 63,
            description: "Staff-room savings circle, eight seats".to_string(),
            created_at: now - Duration::days(12),
            members: vec![
                member(&users[4], 1, false, false),
                member(&users[1], 2, false, false),
                member(&users[7], 3, false, false),
                member(&users[5], 4, false, false),
                member(&users[3], 5, false, false),
            ],
        },
        Jamiya {
            id: "jamiya_3".to_string(),
            name: "El Harrach traders".to_string(),
            monthly_amount: 15000.0,
            duration: 6,
            max_members: 6,
            current_members: 5,
            status: JamiyaStatus::GuaranteeMonth,
            current_cycle: 0,
            income_level: IncomeLevel::Medium,
            progress: 83,
            description: "Market traders, guarantee month in progress".to_string(),
            created_at: now - Duration::days(35),
            members: vec![
                member(&users[7], 1, false, false),
                member(&users[4], 2, false, false),
                member(&users[1], 3, false, false),
                member(&users[2], 4, false, false),
                member(&users[6], 5, false, false),
            ],
        },
        Jamiya {
            id: "jamiya_4".to_string(),
            name: "Families of El Biar".to_string(),
            monthly_amount: 12000.0,
            duration: 6,
            max_members: 6,
            current_members: 6,
            status: JamiyaStatus::Active,
            current_cycle: 2,
            income_level: IncomeLevel::Medium,
            progress: 100,
            description: "Second cycle of six, full rotation".to_string(),
            created_at: now - Duration::days(80),
            members: vec![
                member(&users[1], 1, true, false),
                member(&users[4], 2, false, true),
                member(&users[0], 3, false, false),
                member(&users[7], 4, false, false),
                member(&users[5], 5, false, false),
                member(&users[2], 6, false, false),
            ],
        },
        Jamiya {
            id: "jamiya_5".to_string(),
            name: "Hydra friends".to_string(),
            monthly_amount: 25000.0,
            duration: 5,
            max_members: 5,
            current_members: 5,
            status: JamiyaStatus::Completed,
            current_cycle: 5,
            income_level: IncomeLevel::VeryHigh,
            progress: 100,
            description: "Completed rotation, every member paid out".to_string(),
            created_at: now - Duration::days(260),
            members: vec![
                member(&users[4], 1, true, false),
                member(&users[1], 2, true, false),
                member(&users[7], 3, true, false),
                member(&users[0], 4, true, false),
                member(&users[5], 5, true, false),
            ],
        },
    ];

    let bookings = vec![
        // Live pending booking, picked up by the expiry scheduler on boot
        Booking {
            id: "booking_1".to_string(),
            user_id: "user_3".to_string(),
            jamiya_id: "jamiya_1".to_string(),
            jamiya_name: "Neighbors of Bab El Oued".to_string(),
            status: BookingStatus::Pending,
            activation_fee: ACTIVATION_FEE,
            payment_method: PaymentMethod::Ccp,
            post_office_number: None,
            created_at: now - Duration::hours(1),
            expires_at: now - Duration::hours(1) + Duration::hours(BOOKING_EXPIRY_HOURS),
            verified_at: None,
        },
        // The confirmation that produced membership_1
        Booking {
            id: "booking_2".to_string(),
            user_id: "user_1".to_string(),
            jamiya_id: "jamiya_4".to_string(),
            jamiya_name: "Families of El Biar".to_string(),
            status: BookingStatus::Confirmed,
            activation_fee: ACTIVATION_FEE,
            payment_method: PaymentMethod::Ccp,
            post_office_number: Some("POST-2025-ALGR-0137".to_string()),
            created_at: now - Duration::days(76),
            expires_at: now - Duration::days(76) + Duration::hours(BOOKING_EXPIRY_HOURS),
            verified_at: Some(now - Duration::days(75)),
        },
        Booking {
            id: "booking_3".to_string(),
            user_id: "user_7".to_string(),
            jamiya_id: "jamiya_2".to_string(),
            jamiya_name: "Teachers of Oran".to_string(),
            status: BookingStatus::Expired,
            activation_fee: ACTIVATION_FEE,
            payment_method: PaymentMethod::Card,
            post_office_number: None,
            created_at: now - Duration::days(20),
            expires_at: now - Duration::days(18),
            verified_at: None,
        },
    ];

    let active_memberships = vec![ActiveMembership {
        id: "membership_1".to_string(),
        user_id: "user_1".to_string(),
        jamiya_id: "jamiya_4".to_string(),
        jamiya_name: "Families of El Biar".to_string(),
        monthly_amount: 12000.0,
        position: 3,
        current_cycle: 2,
        total_cycles: 6,
        next_payment_date: now + Duration::days(12),
        current_receiver_name: "Amina Cherif".to_string(),
        is_current_receiver: false,
        has_paid_this_cycle: false,
    }];

    let transactions = vec![
        Transaction {
            id: "trans_1".to_string(),
            user_id: "user_1".to_string(),
            jamiya_id: Some("jamiya_4".to_string()),
            jamiya_name: Some("Families of El Biar".to_string()),
            kind: TransactionKind::Fee,
            amount: ACTIVATION_FEE,
            status: PaymentStatus::Completed,
            date: now - Duration::days(75),
            description: "Activation fee - Families of El Biar".to_string(),
            receipt_url: Some("#".to_string()),
        },
        Transaction {
            id: "trans_2".to_string(),
            user_id: "user_1".to_string(),
            jamiya_id: Some("jamiya_4".to_string()),
            jamiya_name: Some("Families of El Biar".to_string()),
            kind: TransactionKind::Contribution,
            amount: 12000.0,
            status: PaymentStatus::Completed,
            date: now - Duration::days(60),
            description: "Monthly contribution - Families of El Biar".to_string(),
            receipt_url: Some("#".to_string()),
        },
        Transaction {
            id: "trans_3".to_string(),
            user_id: "user_1".to_string(),
            jamiya_id: Some("jamiya_4".to_string()),
            jamiya_name: Some("Families of El Biar".to_string()),
            kind: TransactionKind::Contribution,
            amount: 12000.0,
            status: PaymentStatus::Completed,
            date: now - Duration::days(30),
            description: "Monthly contribution - Families of El Biar".to_string(),
            receipt_url: Some("#".to_string()),
        },
        Transaction {
            id: "trans_4".to_string(),
            user_id: "user_2".to_string(),
            jamiya_id: Some("jamiya_4".to_string()),
            jamiya_name: Some("Families of El Biar".to_string()),
            kind: TransactionKind::Receiving,
            amount: 72000.0,
            status: PaymentStatus::Completed,
            date: now - Duration::days(45),
            description: "Cycle payout - Families of El Biar".to_string(),
            receipt_url: Some("#".to_string()),
        },
        Transaction {
            id: "trans_5".to_string(),
            user_id: "user_5".to_string(),
            jamiya_id: Some("jamiya_5".to_string()),
            jamiya_name: Some("Hydra friends".to_string()),
            kind: TransactionKind::Receiving,
            amount: 125000.0,
            status: PaymentStatus::Completed,
            date: now - Duration::days(100),
            description: "Cycle payout - Hydra friends".to_string(),
            receipt_url: Some("#".to_string()),
        },
        Transaction {
            id: "trans_6".to_string(),
            user_id: "user_7".to_string(),
            jamiya_id: Some("jamiya_2".to_string()),
            jamiya_name: Some("Teachers of Oran".to_string()),
            kind: TransactionKind::Refund,
            amount: ACTIVATION_FEE,
            status: PaymentStatus::Pending,
            date: now - Duration::days(10),
            description: "Activation fee refund - Teachers of Oran".to_string(),
            receipt_url: None,
        },
    ];

    let notifications = vec![
        Notification {
            id: "notif_1".to_string(),
            user_id: "user_1".to_string(),
            title: "Payment reminder".to_string(),
            message: "Your contribution to Families of El Biar is due in 12 days".to_string(),
            kind: NotificationKind::Warning,
            is_read: false,
            created_at: now - Duration::days(2),
        },
        Notification {
            id: "notif_2".to_string(),
            user_id: "user_1".to_string(),
            title: "Welcome".to_string(),
            message: "Welcome to the jamiya app".to_string(),
            kind: NotificationKind::Info,
            is_read: true,
            created_at: now - Duration::days(90),
        },
        Notification {
            id: "notif_3".to_string(),
            user_id: "user_3".to_string(),
            title: "Booking created".to_string(),
            message: "Your booking in Neighbors of Bab El Oued was created successfully"
                .to_string(),
            kind: NotificationKind::Success,
            is_read: false,
            created_at: now - Duration::hours(1),
        },
        Notification {
            id: "notif_4".to_string(),
            user_id: "user_2".to_string(),
            title: "Payout received".to_string(),
            message: "You received 72000 DZD from Families of El Biar".to_string(),
            kind: NotificationKind::Success,
            is_read: true,
            created_at: now - Duration::days(45),
        },
    ];

    AppData {
        users,
        jamiyas,
        bookings,
        active_memberships,
        transactions,
        notifications,
    }
}
