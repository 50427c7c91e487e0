//! Lianel-Validation Core
//!
//! Pure field predicates used by the signup form. Every function here is
//! total: no side effects, no panics, deterministic for a given input.

pub mod email;
pub mod password;
pub mod username;

pub use email::is_email_valid;
pub use password::{password_valid, score_password, PasswordStrength};
pub use username::username_valid;
