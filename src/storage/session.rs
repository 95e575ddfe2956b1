//! Persisted login session
//!
//! The token and user from the last successful login are kept on disk so
//! later invocations can bootstrap the store without asking for a password.

use serde::{Deserialize, Serialize};

use super::file_io::{read_json, remove_if_exists, write_json_atomic};
use crate::auth::{AuthenticationState, LoginPayload};
use crate::config::SpendlinkPaths;
use crate::error::SpendlinkError;
use crate::models::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub is_active: bool,
}

impl Session {
    /// Session for an authenticated state, `None` when logged out
    pub fn from_state(state: &AuthenticationState) -> Option<Self> {
        if !state.is_authenticated {
            return None;
        }
        Some(Self {
            token: state.token.clone()?,
            user: state.user.clone()?,
            is_active: state.is_active,
        })
    }

    /// Payload that restores this session into the store
    pub fn into_payload(self) -> LoginPayload {
        LoginPayload::authenticated(self.token, self.user, self.is_active)
    }

    pub fn load(paths: &SpendlinkPaths) -> Result<Option<Self>, SpendlinkError> {
        read_json(paths.session_file())
    }

    pub fn save(&self, paths: &SpendlinkPaths) -> Result<(), SpendlinkError> {
        let path = paths.session_file();
        write_json_atomic(&path, self)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).map_err(
                |e| SpendlinkError::Storage(format!("Failed to restrict session file: {}", e)),
            )?;
        }

        Ok(())
    }

    pub fn clear(paths: &SpendlinkPaths) -> Result<(), SpendlinkError> {
        remove_if_exists(paths.session_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, UserId};
    use tempfile::TempDir;

    fn user() -> User {
        User {
            user_id: UserId::new(2),
            account_id: AccountId::new(20),
            first_name: "Sam".into(),
            last_name: "Ortiz".into(),
        }
    }

    #[test]
    fn test_logged_out_state_has_no_session() {
        assert!(Session::from_state(&AuthenticationState::default()).is_none());

        // Authenticated without a token is not something we can restore
        let partial = AuthenticationState {
            is_authenticated: true,
            token: None,
            user: Some(user()),
            is_active: false,
        };
        assert!(Session::from_state(&partial).is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlinkPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(Session::load(&paths).unwrap().is_none());

        let state = AuthenticationState {
            is_authenticated: true,
            token: Some("tok".into()),
            user: Some(user()),
            is_active: true,
        };
        let session = Session::from_state(&state).unwrap();
        session.save(&paths).unwrap();

        let loaded = Session::load(&paths).unwrap().unwrap();
        assert_eq!(loaded, session);
        assert_eq!(
            state.merged(&loaded.into_payload()),
            state,
            "restoring the session reproduces the state"
        );

        Session::clear(&paths).unwrap();
        assert!(Session::load(&paths).unwrap().is_none());
    }
}
