//! E-mail helpers for destination validation and log masking

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("e-mail pattern is valid")
});

/// Check if an address looks like a deliverable e-mail address
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_REGEX.is_match(address)
}

/// Mask the local part of an e-mail address for logs (`a***@example.com`)
pub fn mask_email(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Mask a delivery destination, whichever channel it belongs to
pub fn mask_destination(destination: &str) -> String {
    if destination.contains('@') {
        mask_email(destination)
    } else {
        super::phone::mask_phone_number(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.org"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("not-an-email"));
    }

    #[test]
    fn test_mask_destination() {
        assert_eq!(mask_destination("alice@example.com"), "a***@example.com");
        assert_eq!(mask_destination("+15551230001"), "+15*****0001");
        assert_eq!(mask_destination("@example.com"), "***");
    }
}
