//! Bank account model

use serde::{Deserialize, Serialize};

use super::ids::{BankAccountId, LinkId};
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub bank_account_id: BankAccountId,
    pub link_id: LinkId,
    pub name: String,
    #[serde(default)]
    pub mask: Option<String>,
    #[serde(default)]
    pub available_balance: Money,
    #[serde(default)]
    pub current_balance: Money,
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub sub_type: String,
}

impl BankAccount {
    /// Name with the last digits of the account number, when known
    pub fn label(&self) -> String {
        match self.mask.as_deref() {
            Some(mask) if !mask.is_empty() => format!("{} (...{})", self.name, mask),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_type_keyword() {
        let json = r#"{
            "bankAccountId": 1, "linkId": 2, "name": "Checking", "mask": "0001",
            "availableBalance": 10000, "currentBalance": 12000,
            "type": "depository", "subType": "checking"
        }"#;
        let account: BankAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, "depository");
        assert_eq!(account.current_balance, Money::from_cents(12000));
        assert_eq!(account.label(), "Checking (...0001)");
    }
}
