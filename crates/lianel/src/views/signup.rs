use maud::{html, Markup};

use super::{layout, PageContext};
use crate::form::{Field, FormState};
use crate::navigation::{ROOT_PATH, SIGNUP_PATH};
use crate::submission::SubmissionState;
use lianel_validation::PasswordStrength;

/// Element ids targeted by out-of-band swaps
pub const STATUS_ID: &str = "signup-status";
pub const SUBMIT_ID: &str = "signup-submit";
pub const STRENGTH_ID: &str = "password-strength";

/// Polling interval while waiting for the post-signup navigation
const NAVIGATION_POLL: &str = "every 200ms";

pub fn error_slot_id(field: Field) -> String {
    format!("err-{}", field.name())
}

fn session_href(ctx: &PageContext, session_id: &str, action: &str) -> String {
    ctx.href(&format!("{}/{}/{}", SIGNUP_PATH, session_id, action))
}

pub fn field_url(ctx: &PageContext, session_id: &str) -> String {
    session_href(ctx, session_id, "field")
}

pub fn submit_url(ctx: &PageContext, session_id: &str) -> String {
    session_href(ctx, session_id, "submit")
}

pub fn navigation_url(ctx: &PageContext, session_id: &str) -> String {
    session_href(ctx, session_id, "navigation")
}

fn input_type(field: Field) -> &'static str {
    match field {
        Field::Email | Field::Email2 => "email",
        Field::Password | Field::Password2 => "password",
        Field::Birthday => "date",
        _ => "text",
    }
}

fn placeholder(field: Field) -> Option<&'static str> {
    match field {
        Field::Username => Some("6–12 letters or digits"),
        Field::Country => Some("Country name (e.g., UK)"),
        Field::Mobile => Some("+44..."),
        Field::Password => Some("12–24 chars, mixed"),
        _ => None,
    }
}

/// Inline message for one field; empty when the field has none
pub fn field_error(form: &FormState, field: Field) -> Markup {
    html! {
        @if let Some(message) = form.field_error(field) {
            p.field-error { (message) }
        }
    }
}

/// Five segments, the first `level` filled, plus the label
pub fn strength_bar(strength: PasswordStrength) -> Markup {
    html! {
        div.strength-bar {
            @for candidate in PasswordStrength::ALL {
                @if candidate.level() <= strength.level() {
                    span.segment.filled aria-hidden="true" {}
                } @else {
                    span.segment aria-hidden="true" {}
                }
            }
        }
        div.strength-label { "Strength: " (strength.label()) }
    }
}

pub fn submit_button(form: &FormState, state: &SubmissionState) -> Markup {
    let enabled = form.can_submit() && state.accepts_submit();
    html! {
        button type="submit" disabled[!enabled] {
            @if state.is_busy() { "Saving…" } @else { "Create account" }
        }
        span.htmx-indicator id="signup-saving" { "Saving…" }
    }
}

/// Form-level message box. On success it also polls for the navigation.
pub fn status_box(ctx: &PageContext, session_id: &str, state: &SubmissionState) -> Markup {
    html! {
        div id=(STATUS_ID) {
            @if let Some(message) = state.error_message() {
                div.alert.alert-error role="alert" { (message) }
            }
            @if let Some(message) = state.success_message() {
                div.alert.alert-success role="status" { (message) }
                div hx-get=(navigation_url(ctx, session_id)) hx-trigger=(NAVIGATION_POLL) hx-swap="none" {}
            }
        }
    }
}

fn input(ctx: &PageContext, session_id: &str, form: &FormState, field: Field) -> Markup {
    // Secrets are never echoed back into the page
    let value = if field.is_secret() { "" } else { form.get(field) };
    html! {
        div.field {
            label for=(field.name()) { (field.label()) }
            input
                id=(field.name())
                name=(field.name())
                type=(input_type(field))
                value=(value)
                placeholder=[placeholder(field)]
                required[field.is_required()]
                hx-post=(field_url(ctx, session_id))
                hx-trigger="input changed delay:200ms, change"
                hx-params=(field.name())
                hx-swap="none";
            @if field == Field::Password {
                div id=(STRENGTH_ID) { (strength_bar(form.password_strength())) }
            }
            div id=(error_slot_id(field)) { (field_error(form, field)) }
        }
    }
}

/// Fields laid out in pairs, the way the form reads top to bottom
const ROWS: [&[Field]; 6] = [
    &[Field::Username],
    &[Field::FirstName, Field::LastName],
    &[Field::Email, Field::Email2],
    &[Field::Country, Field::Mobile],
    &[Field::Birthday],
    &[Field::Password, Field::Password2],
];

pub fn signup_form(ctx: &PageContext, session_id: &str, form: &FormState, state: &SubmissionState) -> Markup {
    html! {
        form id="signup-form"
            hx-post=(submit_url(ctx, session_id))
            hx-target={ "#" (STATUS_ID) }
            hx-swap="outerHTML"
            hx-indicator="#signup-saving"
            hx-disabled-elt={ "#" (SUBMIT_ID) " button" } {
            @for row in ROWS {
                div.row {
                    @for field in row.iter() {
                        (input(ctx, session_id, form, *field))
                    }
                }
            }
            div.actions {
                div id=(SUBMIT_ID) { (submit_button(form, state)) }
                a.button.secondary href=(ctx.href(ROOT_PATH)) { "Cancel" }
            }
        }
    }
}

pub fn signup_page(ctx: &PageContext, session_id: &str, form: &FormState, state: &SubmissionState) -> Markup {
    layout::page(
        ctx,
        "Sign up",
        html! {
            div.card {
                h1 { "Create your account" }
                p { "Fill in your details to create a new profile." }
                (status_box(ctx, session_id, state))
                (signup_form(ctx, session_id, form, state))
            }
        },
    )
}

/// Status box content for a session that no longer exists
pub fn session_expired(ctx: &PageContext) -> Markup {
    html! {
        div.alert.alert-error role="alert" {
            "This form has expired. "
            a href=(ctx.href(SIGNUP_PATH)) { "Reload the signup page" }
            " to start again."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = "3f2b";

    #[test]
    fn test_pristine_page_has_no_errors() {
        let html = signup_page(&PageContext::default(), SESSION, &FormState::new(), &SubmissionState::Idle)
            .into_string();
        assert!(!html.contains("field-error"));
        assert!(html.contains(r#"<div id="err-username"></div>"#));
        assert!(html.contains(r#"hx-post="/app/signup/3f2b/field""#));
        assert!(html.contains(r#"hx-post="/app/signup/3f2b/submit""#));
        assert!(html.contains("disabled"));
        assert!(html.contains("Strength: Very weak"));
    }

    #[test]
    fn test_every_field_has_an_input() {
        let html = signup_page(&PageContext::default(), SESSION, &FormState::new(), &SubmissionState::Idle)
            .into_string();
        for field in Field::ALL {
            assert!(html.contains(&format!(r#"name="{}""#, field.name())), "missing input {}", field);
        }
    }

    #[test]
    fn test_field_error_markup() {
        let form = FormState::new().with(Field::Email, "nope");
        assert_eq!(
            field_error(&form, Field::Email).into_string(),
            r#"<p class="field-error">Invalid email format.</p>"#
        );
        assert_eq!(field_error(&form, Field::Username).into_string(), "");
    }

    #[test]
    fn test_strength_bar_fills_segments() {
        let html = strength_bar(PasswordStrength::Okay).into_string();
        assert_eq!(html.matches("segment filled").count(), 3);
        assert_eq!(html.matches("<span").count(), 5);
        assert!(html.contains("Strength: Okay"));
    }

    #[test]
    fn test_submit_button_states() {
        let form = FormState::new();
        let idle = submit_button(&form, &SubmissionState::Idle).into_string();
        assert!(idle.contains("disabled"));
        assert!(idle.contains("Create account"));

        let busy = submit_button(&form, &SubmissionState::Busy).into_string();
        assert!(busy.contains("Saving…</button>"));
        assert!(busy.contains("disabled"));
    }

    #[test]
    fn test_submit_button_enabled_for_valid_form() {
        let form = FormState::new()
            .with(Field::Username, "ana2024")
            .with(Field::FirstName, "Ana")
            .with(Field::LastName, "Lopez")
            .with(Field::Birthday, "1990-04-12")
            .with(Field::Country, "UK")
            .with(Field::Email, "ana@example.com")
            .with(Field::Email2, "ana@example.com")
            .with(Field::Password, "Abcdefg1!234")
            .with(Field::Password2, "Abcdefg1!234");
        let idle = submit_button(&form, &SubmissionState::Idle).into_string();
        assert!(!idle.contains("disabled"));

        let retry = submit_button(&form, &SubmissionState::Failed("x".into())).into_string();
        assert!(!retry.contains("disabled"));

        let done = submit_button(&form, &SubmissionState::Succeeded("ok".into())).into_string();
        assert!(done.contains("disabled"));
    }

    #[test]
    fn test_status_box() {
        let ctx = PageContext::default();
        let failed = status_box(&ctx, SESSION, &SubmissionState::Failed("username taken".into())).into_string();
        assert!(failed.contains("username taken"));
        assert!(!failed.contains("hx-get"));

        let done = status_box(&ctx, SESSION, &SubmissionState::Succeeded("Profile created!".into())).into_string();
        assert!(done.contains("Profile created!"));
        assert!(done.contains(r#"hx-get="/app/signup/3f2b/navigation""#));
    }

    #[test]
    fn test_passwords_are_not_echoed() {
        let form = FormState::new()
            .with(Field::Username, "ana2024")
            .with(Field::Password, "Abcdefg1!234");
        let html = signup_form(&PageContext::default(), SESSION, &form, &SubmissionState::Idle).into_string();
        assert!(html.contains(r#"value="ana2024""#));
        assert!(!html.contains("Abcdefg1!234"));
    }
}
