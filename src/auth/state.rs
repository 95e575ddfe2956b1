//! Authentication state and the login payload merged into it

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Who is logged in, for the whole session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationState {
    pub is_authenticated: bool,
    pub token: Option<String>,
    pub user: Option<User>,
    /// Whether the account has an active subscription
    pub is_active: bool,
}

/// Fields delivered by a login bootstrap
///
/// Only the fields that are present are merged into the state; absent
/// fields leave the prior value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_authenticated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl LoginPayload {
    /// Payload for a fully authenticated session
    pub fn authenticated(token: impl Into<String>, user: User, is_active: bool) -> Self {
        Self {
            is_authenticated: Some(true),
            token: Some(token.into()),
            user: Some(user),
            is_active: Some(is_active),
        }
    }
}

impl AuthenticationState {
    /// Copy of this state with the payload's present fields applied
    pub fn merged(&self, payload: &LoginPayload) -> Self {
        Self {
            is_authenticated: payload.is_authenticated.unwrap_or(self.is_authenticated),
            token: payload.token.clone().or_else(|| self.token.clone()),
            user: payload.user.clone().or_else(|| self.user.clone()),
            is_active: payload.is_active.unwrap_or(self.is_active),
        }
    }
}
