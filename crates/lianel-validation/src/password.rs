//! Password validation and strength scoring
//!
//! `password_valid` is the hard gate for submission. `score_password` is
//! advisory feedback for the strength bar. The two are computed
//! independently: a password can score "Very strong" and still fail the
//! length cap, or pass the gate while scoring below the maximum.

/// Minimum password length in characters
pub const PASSWORD_MIN_LEN: usize = 12;

/// Maximum password length in characters
pub const PASSWORD_MAX_LEN: usize = 24;

fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

/// Anything outside `A-Z a-z 0-9` counts, including non-ASCII letters.
fn has_special(password: &str) -> bool {
    password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Validates a password: 12 to 24 characters with at least one lowercase
/// letter, one uppercase letter, one digit and one special character.
///
/// # Examples
/// ```
/// use lianel_validation::password_valid;
/// assert!(password_valid("Abcdefg1!234"));
/// assert!(!password_valid("abcdefgh1234"));
/// ```
pub fn password_valid(password: &str) -> bool {
    let length = password.chars().count();
    let checks = [
        (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&length),
        has_lowercase(password),
        has_uppercase(password),
        has_digit(password),
        has_special(password),
    ];

    checks.iter().all(|passed| *passed)
}

/// Five-step strength rating shown under the password field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Okay,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    /// All levels, weakest first
    pub const ALL: [PasswordStrength; 5] = [
        PasswordStrength::VeryWeak,
        PasswordStrength::Weak,
        PasswordStrength::Okay,
        PasswordStrength::Strong,
        PasswordStrength::VeryStrong,
    ];

    /// Numeric level in `1..=5`
    pub fn level(self) -> u8 {
        match self {
            PasswordStrength::VeryWeak => 1,
            PasswordStrength::Weak => 2,
            PasswordStrength::Okay => 3,
            PasswordStrength::Strong => 4,
            PasswordStrength::VeryStrong => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::VeryWeak => "Very weak",
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Okay => "Okay",
            PasswordStrength::Strong => "Strong",
            PasswordStrength::VeryStrong => "Very strong",
        }
    }

    /// Level for a raw score; scores below 1 clamp to `VeryWeak`
    fn from_score(score: usize) -> Self {
        Self::ALL[score.clamp(1, Self::ALL.len()) - 1]
    }
}

/// Scores a password from 1 to 5, one point per satisfied criterion:
/// length of at least 12, lowercase, uppercase, digit, special character.
///
/// The empty password still scores 1.
pub fn score_password(password: &str) -> PasswordStrength {
    let criteria = [
        password.chars().count() >= PASSWORD_MIN_LEN,
        has_lowercase(password),
        has_uppercase(password),
        has_digit(password),
        has_special(password),
    ];

    PasswordStrength::from_score(criteria.iter().filter(|met| **met).count())
}
