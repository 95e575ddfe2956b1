//! Authentication reducer
//!
//! A pure state transition. Diagnostics are not touched here; the store
//! asks [`super::diagnostics_event`] what to report after applying it.

use std::sync::Arc;

use super::state::AuthenticationState;
use crate::store::Action;

/// Apply `action` to the authentication slice
///
/// Actions that do not concern authentication return the same `Arc`, so
/// callers can detect a no-op with `Arc::ptr_eq`.
pub fn reduce(state: &Arc<AuthenticationState>, action: &Action) -> Arc<AuthenticationState> {
    match action {
        Action::BootstrapLogin(payload) => Arc::new(state.merged(payload)),
        Action::ActivateSubscription => Arc::new(AuthenticationState {
            is_active: true,
            ..AuthenticationState::clone(state)
        }),
        Action::Logout => Arc::new(AuthenticationState {
            is_authenticated: false,
            token: None,
            user: None,
            ..AuthenticationState::clone(state)
        }),
        _ => Arc::clone(state),
    }
}
