//! API handlers and shared utilities for Fundika.
//!
//! This module organizes the service's route handlers and provides common
//! functions for principal validation used across the auth flows.

pub mod auth;
pub mod health;
pub mod root;

use regex::Regex;

/// Passwords shorter than this are rejected before hashing.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Lightweight email sanity check used by auth handlers before persisting data.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Kenyan-style MSISDN: optional +, then 9 to 14 digits.
pub fn valid_phone(phone: &str) -> bool {
    Regex::new(r"^\+?[0-9]{9,14}$").is_ok_and(|re| re.is_match(phone))
}

pub fn valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_accepts_simple() {
        assert!(valid_email("user@example.com"));
    }

    #[test]
    fn valid_email_rejects_missing_at() {
        assert!(!valid_email("user.example.com"));
    }

    #[test]
    fn valid_email_rejects_spaces() {
        assert!(!valid_email("user name@example.com"));
    }

    #[test]
    fn valid_phone_accepts_msisdn() {
        assert!(valid_phone("+254712345678"));
        assert!(valid_phone("0712345678"));
    }

    #[test]
    fn valid_phone_rejects_letters() {
        assert!(!valid_phone("+2547A2345678"));
    }

    #[test]
    fn valid_phone_rejects_short() {
        assert!(!valid_phone("12345"));
    }

    #[test]
    fn valid_password_accepts_min_length() {
        assert!(valid_password("12345678"));
    }

    #[test]
    fn valid_password_rejects_short() {
        assert!(!valid_password("1234567"));
    }
}
