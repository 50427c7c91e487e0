// Lianel - signup and profile listing web client
// Server-rendered with Maud and htmx, backed by the profile REST service

pub mod api;
pub mod config;
pub mod form;
pub mod navigation;
pub mod response;
pub mod submission;
pub mod views;

pub use api::{ApiError, CreateProfileRequest, HttpProfileApi, Profile, ProfileApi};
pub use config::Config;
pub use form::{DerivedValidity, Field, FormState};
pub use navigation::Navigator;
pub use response::{fragment, redirect, FragmentResponse, RedirectResponse};
pub use submission::{SubmissionController, SubmissionState, SubmitOutcome};
pub use views::PageContext;

// Re-export the predicate crate for callers that validate outside a form
pub use lianel_validation as validation;
