//! Domain-level command types: the inputs screens hand to store actions.

pub mod session {
    use shared::IncomeLevel;

    /// Input for registering a new account. Registration implies login.
    #[derive(Debug, Clone)]
    pub struct RegisterUserCommand {
        pub phone: String,
        pub email: String,
        pub password: String,
        pub full_name: String,
        pub income_level: Option<IncomeLevel>,
    }

    /// The two document encodings uploaded during KYC.
    #[derive(Debug, Clone)]
    pub struct KycDocumentsCommand {
        pub id_card_image: String,
        pub selfie_image: String,
    }
}

pub mod jamiya {
    use shared::IncomeLevel;

    /// Input for creating a new jamiya. Missing fields fall back to
    /// defaults; range validation lives in the UI layer.
    #[derive(Debug, Clone, Default)]
    pub struct CreateJamiyaCommand {
        pub name: Option<String>,
        pub monthly_amount: Option<f64>,
        pub duration: Option<u32>,
        pub max_members: Option<u32>,
        pub income_level: Option<IncomeLevel>,
        pub description: Option<String>,
    }
}

pub mod booking {
    use shared::PaymentMethod;

    /// Input for reserving a seat in a jamiya.
    #[derive(Debug, Clone)]
    pub struct CreateBookingCommand {
        pub jamiya_id: String,
        pub payment_method: PaymentMethod,
    }
}

pub mod notification {
    use shared::NotificationKind;

    /// Input for emitting a notification to a user.
    #[derive(Debug, Clone)]
    pub struct AddNotificationCommand {
        pub user_id: String,
        pub title: String,
        pub message: String,
        pub kind: NotificationKind,
    }
}
