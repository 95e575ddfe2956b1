//! Balance summary for a bank account

use serde::{Deserialize, Serialize};

use super::ids::BankAccountId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub bank_account_id: BankAccountId,
    pub current: Money,
    pub available: Money,
    /// Available minus what is already set aside for spending
    #[serde(default)]
    pub safe: Money,
    #[serde(default)]
    pub expenses: Money,
    #[serde(default)]
    pub goals: Money,
}
