//! Funding schedule display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::local_date;
use crate::models::{FundingSchedule, FundingScheduleId};

#[derive(Tabled)]
struct FundingScheduleRow {
    #[tabled(rename = "ID")]
    id: FundingScheduleId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Next")]
    next: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format funding schedules as a table
pub fn format_funding_schedule_list(schedules: &[FundingSchedule], date_format: &str) -> String {
    if schedules.is_empty() {
        return "No funding schedules found.".to_string();
    }

    let rows = schedules.iter().map(|f| FundingScheduleRow {
        id: f.funding_schedule_id,
        name: f.name.clone(),
        next: local_date(&f.next_occurrence, date_format),
        description: f.description.clone(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}
