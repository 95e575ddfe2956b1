//! Authentication service
//!
//! Logs in against the backend and bootstraps the store with the session.

use std::sync::Arc;

use crate::api::Backend;
use crate::auth::LoginPayload;
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::storage::Session;
use crate::store::{Action, AppState, StoreHandle};

/// Service for logging in and out
pub struct AuthService<'a> {
    backend: &'a dyn Backend,
    store: &'a StoreHandle,
}

impl<'a> AuthService<'a> {
    pub fn new(backend: &'a dyn Backend, store: &'a StoreHandle) -> Self {
        Self { backend, store }
    }

    /// Log in with credentials and bootstrap the store
    pub async fn login(&self, email: &str, password: &str) -> SpendlinkResult<Arc<AppState>> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SpendlinkError::Validation("Email is required".into()));
        }
        if password.is_empty() {
            return Err(SpendlinkError::Validation("Password is required".into()));
        }

        let login = self.backend.login(email, password).await?;
        self.backend.set_token(Some(login.token.clone()));

        let me = match self.backend.me().await {
            Ok(me) => me,
            Err(e) => {
                self.backend.set_token(None);
                return Err(e);
            }
        };

        tracing::info!(account_id = %me.user.account_id, "logged in");
        let payload =
            LoginPayload::authenticated(login.token, me.user, login.is_active || me.is_active);
        self.store.dispatch(Action::BootstrapLogin(payload)).await
    }

    /// Bootstrap the store from a persisted session without a network call
    pub async fn restore(&self, session: Session) -> SpendlinkResult<Arc<AppState>> {
        self.backend.set_token(Some(session.token.clone()));
        tracing::debug!(account_id = %session.user.account_id, "restoring session");
        self.store
            .dispatch(Action::BootstrapLogin(session.into_payload()))
            .await
    }

    /// Ask the server whether the subscription is active
    ///
    /// Returns the server's answer; the store is only touched when it is.
    pub async fn refresh_subscription(&self) -> SpendlinkResult<bool> {
        self.require_authenticated()?;

        let me = self.backend.me().await?;
        if me.is_active {
            self.store.dispatch(Action::ActivateSubscription).await?;
        }
        Ok(me.is_active)
    }

    /// Log out locally, telling the server when possible
    pub async fn logout(&self) -> SpendlinkResult<Arc<AppState>> {
        if self.store.snapshot().is_authenticated() {
            if let Err(e) = self.backend.logout().await {
                tracing::warn!(error = %e, "server logout failed; clearing local session anyway");
            }
        }

        self.backend.set_token(None);
        self.store.dispatch(Action::Logout).await
    }

    /// The current state, or [`SpendlinkError::Unauthenticated`]
    pub fn require_authenticated(&self) -> SpendlinkResult<Arc<AppState>> {
        let state = self.store.snapshot();
        if state.is_authenticated() {
            Ok(state)
        } else {
            Err(SpendlinkError::Unauthenticated)
        }
    }
}
