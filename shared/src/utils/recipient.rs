//! Recipient utilities
//!
//! A recipient is either a phone number (E.164) or an email address. These
//! helpers validate the two forms and mask them before they reach a log line.

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").expect("E.164 pattern is valid")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check if a phone number is in E.164 format (e.g. `+15551234567`)
pub fn is_valid_phone(phone: &str) -> bool {
    E164_PHONE_REGEX.is_match(phone)
}

/// Check if an email address has a `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask a recipient for logging
///
/// Email addresses keep their first character and domain, phone numbers keep
/// the last four digits.
///
/// ```
/// use og_shared::recipient::mask_recipient;
///
/// assert_eq!(mask_recipient("alice@example.com"), "a***@example.com");
/// assert_eq!(mask_recipient("+15551234567"), "+*******4567");
/// ```
pub fn mask_recipient(recipient: &str) -> String {
    match recipient.split_once('@') {
        Some((local, domain)) => mask_email(local, domain),
        None => mask_phone(recipient),
    }
}

fn mask_email(local: &str, domain: &str) -> String {
    match local.chars().next() {
        Some(first) => format!("{}***@{}", first, domain),
        None => format!("***@{}", domain),
    }
}

fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let visible_digits = 4;
    if chars.len() <= visible_digits {
        return "*".repeat(chars.len());
    }

    let last_digits: String = chars[chars.len() - visible_digits..].iter().collect();
    let masked_count = chars.len() - visible_digits;

    if chars[0] == '+' {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}
