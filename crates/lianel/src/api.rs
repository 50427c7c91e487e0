//! Profile service client
//!
//! The profile REST API is an external collaborator. `ProfileApi` is the
//! seam the submission controller and the listing page depend on;
//! `HttpProfileApi` is the reqwest implementation used in production.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::config::ApiConfig;

const CREATE_PROFILE_PATH: &str = "/profile/createProfile";
const LIST_PROFILES_PATH: &str = "/profile/getProfiles";

/// Shown when the listing could not be loaded or decoded
pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch.";

/// Payload for the create-profile endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub email: String,
    pub password: String,
}

/// Profile as returned by the service
///
/// Listing responses are allowed to omit the bookkeeping fields, so
/// everything beyond the name and contact fields defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub profile_id: Option<String>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// No response at all
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body could not be decoded
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message to show the user; rejections carry their own, everything
    /// else uses `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport(_) | ApiError::Decode(_) => fallback.to_string(),
        }
    }
}

/// Message for a non-success response.
///
/// The body is parsed as JSON; a body that does not parse is treated as
/// `{ "raw": <text> }`. A non-empty string `error` field wins, then a
/// non-empty string `message` field, then `HTTP <status>`.
pub fn rejection_message(status: u16, body: &str) -> String {
    let data = serde_json::from_str::<JsonValue>(body)
        .unwrap_or_else(|_| serde_json::json!({ "raw": body }));

    ["error", "message"]
        .into_iter()
        .filter_map(|key| data.get(key).and_then(JsonValue::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status))
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Create a profile. `Ok(None)` means the service accepted the request
    /// but its body was not a decodable profile.
    async fn create_profile(&self, request: &CreateProfileRequest) -> Result<Option<Profile>, ApiError>;

    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError>;
}

/// Profiles for the listing page, or the message to show instead
pub async fn fetch_profiles(api: &dyn ProfileApi) -> Result<Vec<Profile>, String> {
    api.list_profiles().await.map_err(|e| {
        warn!(error = %e, "failed to load profiles");
        e.user_message(LIST_FAILED_MESSAGE)
    })
}

/// reqwest-backed client for the profile service
#[derive(Debug, Clone)]
pub struct HttpProfileApi {
    http: Client,
    base_url: String,
}

impl HttpProfileApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Body text for any response; non-success statuses become `Rejected`
    async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status.as_u16(), &text),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn create_profile(&self, request: &CreateProfileRequest) -> Result<Option<Profile>, ApiError> {
        let response = self
            .http
            .post(self.url(CREATE_PROFILE_PATH))
            .json(request)
            .send()
            .await?;

        let text = Self::read_body(response).await?;
        match serde_json::from_str::<Profile>(&text) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("create-profile succeeded with an undecodable body: {}", e);
                Ok(None)
            }
        }
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        let response = self
            .http
            .get(self.url(LIST_PROFILES_PATH))
            .header("Accept", "application/json")
            .send()
            .await?;

        let text = Self::read_body(response).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
