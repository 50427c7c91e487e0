// File: src/app.rs
// Purpose: Router, shared state and request handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use lianel::api::fetch_profiles;
use lianel::navigation::{LISTING_PATH, ROOT_PATH, SIGNUP_PATH};
use lianel::views::signup::{self, STATUS_ID, STRENGTH_ID, SUBMIT_ID};
use lianel::views::{landing, profiles};
use lianel::{fragment, redirect, Config, Field, FormState, PageContext, ProfileApi, SubmissionState};
use maud::html;
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

use crate::sessions::{SessionStore, SignupSession};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<PageContext>,
    pub api: Arc<dyn ProfileApi>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: &Config, api: Arc<dyn ProfileApi>) -> Self {
        Self {
            ctx: Arc::new(PageContext::from_config(config)),
            api,
            sessions: Arc::new(SessionStore::new(config.session.ttl())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let base = state.ctx.base_path.clone();
    let at = |path: &str| format!("{}{}", base, path);

    let mut app = Router::new()
        .route("/", get(landing_handler))
        .route(&at(SIGNUP_PATH), get(signup_handler))
        .route(&at("/signup/:id/field"), post(field_handler))
        .route(&at("/signup/:id/submit"), post(submit_handler))
        .route(&at("/signup/:id/navigation"), get(navigation_handler))
        .route(&at(LISTING_PATH), get(profiles_handler))
        .route(&at("/profiles/table"), get(profiles_table_handler));

    if !base.is_empty() {
        app = app
            .route(&base, get(landing_handler))
            .route(&at(ROOT_PATH), get(landing_handler));
    }

    app.fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Applies submitted `name=value` pairs one field at a time; unknown names are skipped
fn apply_fields(session: &SignupSession, fields: HashMap<String, String>) -> FormState {
    let mut form = session.form();
    for (name, value) in fields {
        match name.parse::<Field>() {
            Ok(field) => {
                if !field.is_secret() {
                    debug!(session = %session.id, field = %field, "field updated");
                }
                form = session.update(field, value);
            }
            Err(e) => debug!(session = %session.id, "{}", e),
        }
    }
    form
}

async fn landing_handler(State(state): State<AppState>) -> Html<String> {
    Html(landing::landing_page(&state.ctx).into_string())
}

async fn signup_handler(State(state): State<AppState>) -> Html<String> {
    let session = state.sessions.mount(state.api.clone()).await;
    let id = session.id.to_string();
    Html(signup::signup_page(&state.ctx, &id, &session.form(), &session.state()).into_string())
}

/// Live validation: re-renders every inline error, the strength bar and
/// the submit button as out-of-band swaps
async fn field_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let Some(session) = state.sessions.get(id).await else {
        return fragment().oob(STATUS_ID, signup::session_expired(&state.ctx)).into_response();
    };

    let form = apply_fields(&session, fields);
    let submission = session.state();

    Field::ALL
        .into_iter()
        .fold(fragment(), |response, field| {
            response.oob(signup::error_slot_id(field), signup::field_error(&form, field))
        })
        .oob(STRENGTH_ID, signup::strength_bar(form.password_strength()))
        .oob(SUBMIT_ID, signup::submit_button(&form, &submission))
        .into_response()
}

async fn submit_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let Some(session) = state.sessions.get(id).await else {
        return fragment()
            .html(html! { div id=(STATUS_ID) { (signup::session_expired(&state.ctx)) } })
            .into_response();
    };

    apply_fields(&session, fields);
    let outcome = session.submit().await;
    debug!(session = %id, ?outcome, "submit handled");

    let form = session.form();
    let submission = session.state();
    fragment()
        .html(signup::status_box(&state.ctx, &id.to_string(), &submission))
        .oob(SUBMIT_ID, signup::submit_button(&form, &submission))
        .into_response()
}

/// htmx stops an `every` trigger when it sees 286
fn stop_polling() -> Response {
    StatusCode::from_u16(286)
        .unwrap_or(StatusCode::NO_CONTENT)
        .into_response()
}

/// Polled after a successful signup until the delayed navigation fires
async fn navigation_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let Some(session) = state.sessions.get(id).await else {
        return stop_polling();
    };

    match session.take_navigation() {
        Some(path) => {
            state.sessions.remove(id).await;
            redirect()
                .to(state.ctx.href(&path))
                .status(StatusCode::OK)
                .into_response()
        }
        None if matches!(session.state(), SubmissionState::Succeeded(_)) => StatusCode::NO_CONTENT.into_response(),
        None => stop_polling(),
    }
}

async fn profiles_handler(State(state): State<AppState>) -> Html<String> {
    Html(profiles::profiles_page(&state.ctx).into_string())
}

async fn profiles_table_handler(State(state): State<AppState>) -> Html<String> {
    let result = fetch_profiles(state.api.as_ref()).await;
    Html(profiles::profile_table(&result).into_string())
}

/// Unknown paths go back to the landing page
async fn fallback_handler(State(state): State<AppState>) -> Response {
    redirect().to(state.ctx.href(ROOT_PATH)).into_response()
}
