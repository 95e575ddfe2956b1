//! Link display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Link, LinkId, LinkStatus};

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "ID")]
    id: LinkId,
    #[tabled(rename = "Institution")]
    institution: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Status")]
    status: LinkStatus,
}

/// Format bank links as a table
pub fn format_link_list(links: &[Link]) -> String {
    if links.is_empty() {
        return "No links found. Run 'spendlink setup' to link a bank.".to_string();
    }

    let rows = links.iter().map(|l| LinkRow {
        id: l.link_id,
        institution: if l.institution_name.is_empty() {
            "(unnamed)".to_string()
        } else {
            l.institution_name.clone()
        },
        kind: if l.is_manual() { "Manual" } else { "Linked" },
        status: l.link_status,
    });

    Table::new(rows).with(Style::psql()).to_string()
}
