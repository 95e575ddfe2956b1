//! Display formatting for terminal output
//!
//! Tables for the collections the client keeps, rendered with `tabled`.

pub mod account;
pub mod funding;
pub mod link;
pub mod spending;

use chrono::{DateTime, Local, Utc};

use crate::config::settings::is_valid_date_format;

pub use account::{format_balance, format_bank_account_list};
pub use funding::format_funding_schedule_list;
pub use link::format_link_list;
pub use spending::{format_spending_created, format_spending_list};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Local date of `at`, in ISO form when `date_format` is not understood
pub(crate) fn local_date(at: &DateTime<Utc>, date_format: &str) -> String {
    let date_format = if is_valid_date_format(date_format) {
        date_format
    } else {
        FALLBACK_DATE_FORMAT
    };
    at.with_timezone(&Local).format(date_format).to_string()
}
