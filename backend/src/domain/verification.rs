//! Pure validation predicates standing in for external services: postal
//! confirmation, OTP, and the form-level checks for phone, e-mail, and
//! password strength.

use once_cell::sync::Lazy;
use regex::Regex;

use shared::DEMO_OTP_CODE;

/// Accepted postal confirmation numbers: `POST-2025-<CITY>-<4 digits>` for
/// each supported wilaya code.
static POST_OFFICE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^POST-2025-ALGR-\d{4}$",
        r"^POST-2025-ORAN-\d{4}$",
        r"^POST-2025-CONST-\d{4}$",
        r"^POST-2025-ANNABA-\d{4}$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("postal pattern is valid"))
    .collect()
});

static ALGERIAN_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|213)[5-7]\d{8}$").expect("phone pattern is valid"));

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Whether a postal confirmation number matches one of the accepted
/// per-city patterns.
pub fn is_valid_post_office_number(number: &str) -> bool {
    POST_OFFICE_PATTERNS.iter().any(|p| p.is_match(number))
}

/// OTP check: plain equality with the fixed demo code. No expiry, no
/// attempt limiting.
pub fn is_valid_otp(code: &str) -> bool {
    code == DEMO_OTP_CODE
}

/// Algerian mobile number: starts with 0 or 213 (a leading + and inner
/// spaces are tolerated), operator prefix 5-7, nine more digits.
pub fn is_valid_algerian_phone(phone: &str) -> bool {
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    ALGERIAN_PHONE.is_match(cleaned)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Password strength score, 0 (worst) to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self.score {
            0 | 1 => "weak",
            2 => "fair",
            3 => "good",
            4 => "strong",
            _ => "very strong",
        }
    }
}

/// Score a password one point each for length >= 8, uppercase, lowercase,
/// digit, and symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    let mut score = 0u8;
    if password.len() >= 8 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    PasswordStrength { score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_office_number_accepts_all_city_codes() {
        assert!(is_valid_post_office_number("POST-2025-ALGR-0001"));
        assert!(is_valid_post_office_number("POST-2025-ORAN-1234"));
        assert!(is_valid_post_office_number("POST-2025-CONST-9999"));
        assert!(is_valid_post_office_number("POST-2025-ANNABA-0042"));
    }

    #[test]
    fn test_post_office_number_rejects_bad_input() {
        assert!(!is_valid_post_office_number("INVALID"));
        assert!(!is_valid_post_office_number("POST-2024-ALGR-0001")); // wrong year
        assert!(!is_valid_post_office_number("POST-2025-PARIS-0001")); // unknown city
        assert!(!is_valid_post_office_number("POST-2025-ALGR-001")); // too few digits
        assert!(!is_valid_post_office_number("POST-2025-ALGR-00011")); // too many digits
        assert!(!is_valid_post_office_number("xPOST-2025-ALGR-0001"));
        assert!(!is_valid_post_office_number(""));
    }

    #[test]
    fn test_otp_matches_demo_code_only() {
        assert!(is_valid_otp("123456"));
        assert!(!is_valid_otp("123457"));
        assert!(!is_valid_otp(""));
        assert!(!is_valid_otp("12345"));
    }

    #[test]
    fn test_algerian_phone_validation() {
        assert!(is_valid_algerian_phone("0551234567"));
        assert!(is_valid_algerian_phone("213551234567"));
        assert!(is_valid_algerian_phone("+213551234567"));
        assert!(is_valid_algerian_phone("0551 23 45 67"));

        assert!(!is_valid_algerian_phone("0451234567")); // bad operator prefix
        assert!(!is_valid_algerian_phone("055123456")); // too short
        assert!(!is_valid_algerian_phone("05512345678")); // too long
        assert!(!is_valid_algerian_phone("not a phone"));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("amina@example.dz"));
        assert!(is_valid_email("a.b@c.co"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.dz"));
        assert!(!is_valid_email("spaces in@example.dz"));
    }

    #[test]
    fn test_password_strength_scoring() {
        assert_eq!(password_strength("").score, 0);
        assert_eq!(password_strength("abc").score, 1); // lowercase only
        assert_eq!(password_strength("password123").score, 3);
        assert_eq!(password_strength("Password123").score, 4);
        assert_eq!(password_strength("Password123!").score, 5);
        assert_eq!(password_strength("Password123!").label(), "very strong");
    }
}
