//! Transaction model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BankAccountId, SpendingId, TransactionId};
use super::money::Money;

/// A bank transaction; positive amounts are debits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub bank_account_id: BankAccountId,
    pub amount: Money,
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_pending: bool,
    #[serde(default)]
    pub spending_id: Option<SpendingId>,
}
