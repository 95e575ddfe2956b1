//! Request and response bodies exchanged with the server

use serde::{Deserialize, Serialize};

use crate::models::{LinkId, User};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Body of `GET /users/me`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: User,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_setup: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTokenResponse {
    pub link_token: String,
}

/// What the bank link widget reports about the chosen institution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionMetadata {
    pub institution_id: String,
    pub institution_name: String,
    pub account_ids: Vec<String>,
}

/// Body of `POST /plaid/link/token/callback`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCallbackRequest {
    pub public_token: String,
    pub institution_id: String,
    pub institution_name: String,
    pub account_ids: Vec<String>,
}

impl LinkCallbackRequest {
    pub fn new(public_token: impl Into<String>, metadata: &InstitutionMetadata) -> Self {
        Self {
            public_token: public_token.into(),
            institution_id: metadata.institution_id.clone(),
            institution_name: metadata.institution_name.clone(),
            account_ids: metadata.account_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCallbackResponse {
    pub link_id: LinkId,
    #[serde(default)]
    pub job_id: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
