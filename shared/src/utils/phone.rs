//! Phone number utilities used for destination validation and log masking

use once_cell::sync::Lazy;
use regex::Regex;

// E.164: leading '+', country code without leading zero, at most 15 digits
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").expect("E.164 pattern is valid")
});

/// Strip common formatting characters (spaces, dashes, parentheses)
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a valid E.164 number after normalization
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(&normalize_phone_number(phone))
}

/// Mask a phone number for logs, keeping the country prefix and last four digits
///
/// `+15551230001` becomes `+15*****0001`. Anything shorter than seven
/// characters is fully masked.
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() < 7 {
        return "****".to_string();
    }
    let head = &normalized[..3];
    let tail = &normalized[normalized.len() - 4..];
    format!("{}{}{}", head, "*".repeat(normalized.len() - 7), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+1 (555) 123-0001"), "+15551230001");
        assert_eq!(normalize_phone_number("138-1234-5678"), "13812345678");
    }

    #[test]
    fn test_is_valid_e164() {
        assert!(is_valid_e164("+15551230001"));
        assert!(is_valid_e164("+8613812345678"));
        assert!(is_valid_e164("+44 20 7183 8750"));
        assert!(!is_valid_e164("15551230001")); // Missing +
        assert!(!is_valid_e164("+0123456789")); // Invalid country code
        assert!(!is_valid_e164("+1234")); // Too short
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+15551230001"), "+15*****0001");
        assert_eq!(mask_phone_number("+8613812345678"), "+86*******5678");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
