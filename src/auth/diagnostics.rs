//! Diagnostics user context
//!
//! Error reports carry the account that was logged in when they happened.
//! The reducer stays pure; after each transition the store asks
//! [`diagnostics_event`] whether the user context changed and forwards the
//! event to every registered [`DiagnosticsSink`].

use parking_lot::RwLock;

use crate::store::Action;

/// Identity attached to diagnostics reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsUser {
    pub id: String,
    pub username: String,
}

/// Change to the diagnostics user context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticsEvent {
    SetUser(DiagnosticsUser),
    ClearUser,
}

/// Observer for diagnostics user context changes
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &DiagnosticsEvent);
}

/// The context change implied by `action`, if any
///
/// A bootstrap without a user means "not logged in" and changes nothing.
pub fn diagnostics_event(action: &Action) -> Option<DiagnosticsEvent> {
    match action {
        Action::BootstrapLogin(payload) => payload.user.as_ref().map(|user| {
            let id = user.account_id.to_string();
            DiagnosticsEvent::SetUser(DiagnosticsUser {
                username: format!("account:{}", id),
                id,
            })
        }),
        Action::Logout => Some(DiagnosticsEvent::ClearUser),
        _ => None,
    }
}

/// Keeps the current user context and records changes through `tracing`
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
    current: RwLock<Option<DiagnosticsUser>>,
}

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<DiagnosticsUser> {
        self.current.read().clone()
    }
}

impl DiagnosticsSink for TracingDiagnostics {
    fn record(&self, event: &DiagnosticsEvent) {
        match event {
            DiagnosticsEvent::SetUser(user) => {
                tracing::debug!(user.id = %user.id, user.username = %user.username, "diagnostics user set");
                *self.current.write() = Some(user.clone());
            }
            DiagnosticsEvent::ClearUser => {
                tracing::debug!("diagnostics user cleared");
                *self.current.write() = None;
            }
        }
    }
}
