//! Password policy for e-mail signup

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols accepted in a password; at least one is required
pub const PASSWORD_SYMBOLS: &str = "$@!%*#?&";

/// Check a signup password against the policy
///
/// At least `MIN_PASSWORD_LENGTH` characters drawn from ASCII letters,
/// digits and `PASSWORD_SYMBOLS`, with at least one of each class.
pub fn is_strong_password(password: &str) -> bool {
    let is_symbol = |c: char| PASSWORD_SYMBOLS.contains(c);

    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().all(|c| c.is_ascii_alphanumeric() || is_symbol(c))
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(is_symbol)
}
