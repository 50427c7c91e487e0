//! Username validation

/// Minimum username length in characters
pub const USERNAME_MIN_LEN: usize = 6;

/// Maximum username length in characters
pub const USERNAME_MAX_LEN: usize = 12;

/// Validates a username: 6 to 12 characters, ASCII letters and digits only.
///
/// # Examples
/// ```
/// use lianel_validation::username_valid;
/// assert!(username_valid("abc123"));
/// assert!(!username_valid("abc"));
/// assert!(!username_valid("abc-123"));
/// ```
pub fn username_valid(username: &str) -> bool {
    // All accepted characters are single-byte, so byte length equals char count
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username.len())
        && username.bytes().all(|b| b.is_ascii_alphanumeric())
}
