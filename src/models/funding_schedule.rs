//! Funding schedule model
//!
//! A recurring allocation of funds (usually payday) toward spending items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BankAccountId, FundingScheduleId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSchedule {
    pub funding_schedule_id: FundingScheduleId,
    pub bank_account_id: BankAccountId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rule: String,
    pub next_occurrence: DateTime<Utc>,
}
