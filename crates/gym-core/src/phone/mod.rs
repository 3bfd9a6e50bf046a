//! Phone number normalization.
//!
//! Operators type numbers with spaces, dashes or a leading `+`; the roster
//! stores bare digits.

/// Number of digits in a valid phone number.
pub const PHONE_DIGITS: usize = 10;

/// Keep only the ASCII digits of `raw`.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether `phone` is exactly [`PHONE_DIGITS`] ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}
