//! User model
//!
//! The logged-in user as reported by the server. The owning account id is
//! what diagnostics key the user context on.

use serde::{Deserialize, Serialize};

use super::ids::{AccountId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    pub account_id: AccountId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// Name for greetings, falling back to the account id
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            format!("account {}", self.account_id)
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_names() {
        let user: User = serde_json::from_str(r#"{"userId": 1, "accountId": 12}"#).unwrap();
        assert_eq!(user.account_id, AccountId::new(12));
        assert_eq!(user.display_name(), "account 12");
    }

    #[test]
    fn test_display_name() {
        let user = User {
            user_id: UserId::new(1),
            account_id: AccountId::new(2),
            first_name: "Ada".into(),
            last_name: String::new(),
        };
        assert_eq!(user.display_name(), "Ada");
    }
}
