//! Email shape check
//!
//! Deliberately coarse: one "@", something on both sides, and a dot with
//! something on both sides after the "@". Whitespace anywhere is rejected.
//! This is not an RFC 5322 parser and must not become one; tightening it
//! changes which addresses the signup form accepts.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Validates the coarse `local@domain.tld` shape.
///
/// # Examples
/// ```
/// use lianel_validation::is_email_valid;
/// assert!(is_email_valid("ana@example.co.uk"));
/// assert!(!is_email_valid("ana example.com"));
/// ```
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}
