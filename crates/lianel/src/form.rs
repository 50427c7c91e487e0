// File: src/form.rs
// Purpose: Signup form field values and the validity derived from them

use std::fmt;
use std::str::FromStr;

use lianel_validation::{is_email_valid, password_valid, score_password, username_valid, PasswordStrength};

use crate::api::CreateProfileRequest;

/// A signup form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    FirstName,
    LastName,
    Birthday,
    Country,
    Mobile,
    Email,
    Email2,
    Password,
    Password2,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Username,
        Field::FirstName,
        Field::LastName,
        Field::Birthday,
        Field::Country,
        Field::Mobile,
        Field::Email,
        Field::Email2,
        Field::Password,
        Field::Password2,
    ];

    /// Input name, identical to the wire name used by the profile API
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Birthday => "birthday",
            Field::Country => "country",
            Field::Mobile => "mobile",
            Field::Email => "email",
            Field::Email2 => "email2",
            Field::Password => "password",
            Field::Password2 => "password2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Birthday => "Birthday",
            Field::Country => "Country",
            Field::Mobile => "Mobile (optional)",
            Field::Email => "Email",
            Field::Email2 => "Verify email",
            Field::Password => "Password",
            Field::Password2 => "Verify password",
        }
    }

    pub fn is_required(self) -> bool {
        self != Field::Mobile
    }

    /// Whether the field's value must never be echoed back or logged
    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::Password2)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown signup field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Current values of every signup field. Starts all-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    username: String,
    first_name: String,
    last_name: String,
    birthday: String,
    country: String,
    mobile: String,
    email: String,
    email2: String,
    password: String,
    password2: String,
}

/// Flags derived from a `FormState`. Never stored; see `FormState::validity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedValidity {
    pub username_valid: bool,
    pub first_name_present: bool,
    pub last_name_present: bool,
    pub birthday_present: bool,
    pub country_present: bool,
    pub email_valid: bool,
    pub email_match: bool,
    pub password_valid: bool,
    pub password_match: bool,
}

impl DerivedValidity {
    pub fn can_submit(&self) -> bool {
        self.username_valid
            && self.first_name_present
            && self.last_name_present
            && self.country_present
            && self.birthday_present
            && self.email_valid
            && self.email_match
            && self.password_valid
            && self.password_match
    }
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn matches(value: &str, confirmation: &str) -> bool {
    !value.is_empty() && value == confirmation
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Birthday => &mut self.birthday,
            Field::Country => &mut self.country,
            Field::Mobile => &mut self.mobile,
            Field::Email => &mut self.email,
            Field::Email2 => &mut self.email2,
            Field::Password => &mut self.password,
            Field::Password2 => &mut self.password2,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Birthday => &self.birthday,
            Field::Country => &self.country,
            Field::Mobile => &self.mobile,
            Field::Email => &self.email,
            Field::Email2 => &self.email2,
            Field::Password => &self.password,
            Field::Password2 => &self.password2,
        }
    }

    /// Replace one field's value, leaving the others untouched
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Builder-style `set`, handy for fixtures
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn validity(&self) -> DerivedValidity {
        DerivedValidity {
            username_valid: username_valid(&self.username),
            first_name_present: present(&self.first_name),
            last_name_present: present(&self.last_name),
            birthday_present: present(&self.birthday),
            country_present: present(&self.country),
            email_valid: is_email_valid(&self.email),
            email_match: matches(&self.email, &self.email2),
            password_valid: password_valid(&self.password),
            password_match: matches(&self.password, &self.password2),
        }
    }

    pub fn can_submit(&self) -> bool {
        self.validity().can_submit()
    }

    pub fn password_strength(&self) -> PasswordStrength {
        score_password(&self.password)
    }

    /// Inline message for a field.
    ///
    /// Only fields with content can carry an error, so a pristine form
    /// shows none.
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        let value = self.get(field);
        if value.is_empty() {
            return None;
        }

        match field {
            Field::Username if !username_valid(value) => {
                Some("Username must be 6–12 characters (letters and numbers only).")
            }
            Field::Email if !is_email_valid(value) => Some("Invalid email format."),
            Field::Email2 if !self.email.is_empty() && self.email != self.email2 => {
                Some("Emails do not match.")
            }
            Field::Password if !password_valid(value) => {
                Some("12–24 chars, must include upper, lower, digit, and special character.")
            }
            Field::Password2 if self.password != self.password2 => Some("Passwords do not match."),
            _ => None,
        }
    }

    /// Create-profile payload; an empty mobile number is left out
    pub fn to_request(&self) -> CreateProfileRequest {
        CreateProfileRequest {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birthday: Some(self.birthday.clone()).filter(|b| !b.is_empty()),
            country: self.country.clone(),
            mobile: Some(self.mobile.clone()).filter(|m| !m.is_empty()),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn complete_form() -> FormState {
        FormState::new()
            .with(Field::Username, "ana2024")
            .with(Field::FirstName, "Ana")
            .with(Field::LastName, "Lopez")
            .with(Field::Birthday, "1990-04-12")
            .with(Field::Country, "UK")
            .with(Field::Email, "ana@example.com")
            .with(Field::Email2, "ana@example.com")
            .with(Field::Password, "Abcdefg1!234")
            .with(Field::Password2, "Abcdefg1!234")
    }

    #[test]
    fn test_complete_form_can_submit() {
        assert!(complete_form().can_submit());
    }

    #[test]
    fn test_pristine_form() {
        let form = FormState::new();
        let validity = form.validity();
        assert!(!validity.can_submit());
        assert!(!validity.email_match);
        assert!(!validity.password_match);
        for field in Field::ALL {
            assert_eq!(form.field_error(field), None, "{} errors on a pristine form", field);
        }
    }

    #[test]
    fn test_any_single_empty_required_field_blocks_submit() {
        for field in Field::ALL.into_iter().filter(|f| f.is_required()) {
            let form = complete_form().with(field, "");
            assert!(!form.can_submit(), "submit allowed with empty {}", field);
        }
    }

    #[test]
    fn test_mobile_is_optional() {
        assert!(complete_form().with(Field::Mobile, "").can_submit());
        assert!(complete_form().with(Field::Mobile, "+44 7700 900000").can_submit());
    }

    #[rstest]
    #[case(Field::FirstName)]
    #[case(Field::LastName)]
    #[case(Field::Country)]
    #[case(Field::Birthday)]
    fn test_whitespace_only_is_not_present(#[case] field: Field) {
        assert!(!complete_form().with(field, "   ").can_submit());
    }

    #[test]
    fn test_both_empty_emails_do_not_match() {
        let form = complete_form().with(Field::Email, "").with(Field::Email2, "");
        assert!(!form.validity().email_match);
    }

    #[test]
    fn test_mismatched_confirmations() {
        let form = complete_form().with(Field::Email2, "ana@example.org");
        assert!(!form.validity().email_match);
        assert!(!form.can_submit());

        let form = complete_form().with(Field::Password2, "Abcdefg1!235");
        assert!(!form.validity().password_match);
        assert!(!form.can_submit());
    }

    #[test]
    fn test_validity_follows_every_update() {
        let mut form = complete_form();
        assert!(form.can_submit());
        form.set(Field::Username, "abc");
        assert!(!form.can_submit());
        form.set(Field::Username, "abc123");
        assert!(form.can_submit());
    }

    #[test]
    fn test_set_touches_one_field() {
        let before = complete_form();
        let mut after = before.clone();
        after.set(Field::Country, "France");
        for field in Field::ALL {
            if field == Field::Country {
                assert_eq!(after.get(field), "France");
            } else {
                assert_eq!(after.get(field), before.get(field));
            }
        }
    }

    #[test]
    fn test_field_errors_need_content() {
        let form = FormState::new()
            .with(Field::Username, "abc")
            .with(Field::Email, "nope")
            .with(Field::Password, "short");
        assert!(form.field_error(Field::Username).is_some());
        assert_eq!(form.field_error(Field::Email), Some("Invalid email format."));
        assert!(form.field_error(Field::Password).is_some());
        assert_eq!(form.field_error(Field::Email2), None);
        assert_eq!(form.field_error(Field::Password2), None);
    }

    #[test]
    fn test_confirmation_errors() {
        let form = FormState::new()
            .with(Field::Email2, "ana@example.com")
            .with(Field::Password2, "x");
        // email2 only complains once email has content; password2 always does
        assert_eq!(form.field_error(Field::Email2), None);
        assert_eq!(form.field_error(Field::Password2), Some("Passwords do not match."));

        let form = form.with(Field::Email, "bob@example.com");
        assert_eq!(form.field_error(Field::Email2), Some("Emails do not match."));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
        assert_eq!("nickname".parse::<Field>(), Err(UnknownField("nickname".into())));
    }

    #[test]
    fn test_request_payload() {
        let request = complete_form().to_request();
        assert_eq!(request.username, "ana2024");
        assert_eq!(request.birthday.as_deref(), Some("1990-04-12"));
        assert_eq!(request.mobile, None);

        let request = complete_form().with(Field::Mobile, "+44").to_request();
        assert_eq!(request.mobile.as_deref(), Some("+44"));
    }

    #[test]
    fn test_password_strength_tracks_password() {
        let form = FormState::new();
        assert_eq!(form.password_strength(), PasswordStrength::VeryWeak);
        let form = form.with(Field::Password, "Abcdefghijk1!");
        assert_eq!(form.password_strength(), PasswordStrength::VeryStrong);
    }
}
