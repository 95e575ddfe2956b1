//! Spending model
//!
//! A spending item is a budgeted line item: either a recurring expense or a
//! one-off goal, funded over time by a funding schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BankAccountId, FundingScheduleId, SpendingId};
use super::money::Money;
use super::recurrence::RecurrenceRule;

/// Kind of spending item, sent as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SpendingType {
    Expense,
    Goal,
}

impl From<SpendingType> for u8 {
    fn from(value: SpendingType) -> Self {
        match value {
            SpendingType::Expense => 0,
            SpendingType::Goal => 1,
        }
    }
}

impl TryFrom<u8> for SpendingType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Expense),
            1 => Ok(Self::Goal),
            other => Err(format!("unknown spending type {}", other)),
        }
    }
}

impl fmt::Display for SpendingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Goal => write!(f, "Goal"),
        }
    }
}

/// A spending item as submitted for creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpending {
    pub bank_account_id: BankAccountId,
    pub name: String,
    pub next_recurrence: DateTime<Utc>,
    pub spending_type: SpendingType,
    pub funding_schedule_id: FundingScheduleId,
    /// Always non-negative
    pub target_amount: Money,
    #[serde(rename = "ruleset")]
    pub recurrence_rule: RecurrenceRule,
}

/// A spending item as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spending {
    pub spending_id: SpendingId,
    pub bank_account_id: BankAccountId,
    pub name: String,
    pub next_recurrence: DateTime<Utc>,
    pub spending_type: SpendingType,
    pub funding_schedule_id: FundingScheduleId,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
    #[serde(default)]
    pub used_amount: Money,
    #[serde(rename = "ruleset", default)]
    pub recurrence_rule: Option<RecurrenceRule>,
    #[serde(default)]
    pub is_behind: bool,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
}

impl Spending {
    /// Amount still needed to reach the target
    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.current_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }
}
