//! Spending display formatting
//!
//! Expenses and goals as a table, plus a short confirmation for a newly
//! created item.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::local_date;
use crate::models::{FundingSchedule, Spending, SpendingId};

#[derive(Tabled)]
struct SpendingRow {
    #[tabled(rename = "ID")]
    id: SpendingId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Left")]
    left: String,
    #[tabled(rename = "Next")]
    next: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Funded by")]
    funding: String,
}

/// Format spending items as a table
pub fn format_spending_list(
    spending: &[Spending],
    funding_schedules: &[FundingSchedule],
    symbol: &str,
    date_format: &str,
) -> String {
    if spending.is_empty() {
        return "No expenses or goals found.".to_string();
    }

    let rows = spending.iter().map(|s| SpendingRow {
        id: s.spending_id,
        name: if s.is_behind {
            format!("{} (behind)", s.name)
        } else {
            s.name.clone()
        },
        kind: s.spending_type.to_string(),
        target: s.target_amount.format_with_symbol(symbol),
        saved: s.current_amount.format_with_symbol(symbol),
        left: s.remaining().format_with_symbol(symbol),
        next: local_date(&s.next_recurrence, date_format),
        frequency: s
            .recurrence_rule
            .as_ref()
            .map(|r| r.description())
            .unwrap_or_else(|| "Once".to_string()),
        funding: funding_schedules
            .iter()
            .find(|f| f.funding_schedule_id == s.funding_schedule_id)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| s.funding_schedule_id.to_string()),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// One-line confirmation for a created item
pub fn format_spending_created(spending: &Spending, symbol: &str, date_format: &str) -> String {
    format!(
        "Created expense '{}' for {} due {} (ID {})",
        spending.name,
        spending.target_amount.format_with_symbol(symbol),
        local_date(&spending.next_recurrence, date_format),
        spending.spending_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BankAccountId, FundingScheduleId, Money, RecurrenceRule, SpendingType,
    };
    use chrono::{TimeZone, Utc};

    fn spending(behind: bool) -> Spending {
        Spending {
            spending_id: SpendingId::new(7),
            bank_account_id: BankAccountId::new(1),
            name: "Rent".into(),
            next_recurrence: Utc.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap(),
            spending_type: SpendingType::Expense,
            funding_schedule_id: FundingScheduleId::new(3),
            target_amount: Money::from_cents(150_000),
            current_amount: Money::from_cents(40_000),
            used_amount: Money::zero(),
            recurrence_rule: Some(RecurrenceRule::parse("FREQ=MONTHLY;INTERVAL=1").unwrap()),
            is_behind: behind,
            date_created: None,
        }
    }

    fn payday() -> FundingSchedule {
        FundingSchedule {
            funding_schedule_id: FundingScheduleId::new(3),
            bank_account_id: BankAccountId::new(1),
            name: "Payday".into(),
            description: String::new(),
            rule: "FREQ=MONTHLY".into(),
            next_occurrence: Utc.with_ymd_and_hms(2026, 10, 31, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_spending_list(&[], &[], "$", "%Y-%m-%d"),
            "No expenses or goals found."
        );
    }

    #[test]
    fn test_list_resolves_funding_schedule_name() {
        let output = format_spending_list(&[spending(true)], &[payday()], "$", "%Y-%m-%d");

        assert!(output.contains("Rent (behind)"));
        assert!(output.contains("$1500.00"));
        assert!(output.contains("$400.00"));
        assert!(output.contains("$1100.00"));
        assert!(output.contains("Every month"));
        assert!(output.contains("Payday"));
    }

    #[test]
    fn test_created_message() {
        let message = format_spending_created(&spending(false), "$", "%Y-%m-%d");
        assert!(message.starts_with("Created expense 'Rent' for $1500.00 due 2026-11-0"));
        assert!(message.ends_with("(ID 7)"));
    }

    #[test]
    fn test_unknown_date_format_falls_back() {
        let message = format_spending_created(&spending(false), "$", "%Q");
        assert!(message.contains("due 2026-11-0"));

        let output = format_spending_list(&[spending(false)], &[payday()], "$", "%Q");
        assert!(output.contains("2026-11-0"));
    }
}
