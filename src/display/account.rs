//! Bank account display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Balance, BankAccount, BankAccountId};

#[derive(Tabled)]
struct BankAccountRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: BankAccountId,
    #[tabled(rename = "Account")]
    label: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Current")]
    current: String,
}

/// Format bank accounts as a table, marking the selected one
pub fn format_bank_account_list(
    accounts: &[BankAccount],
    selected: Option<BankAccountId>,
    symbol: &str,
) -> String {
    if accounts.is_empty() {
        return "No bank accounts found. Run 'spendlink setup' to link a bank.".to_string();
    }

    let rows = accounts.iter().map(|a| BankAccountRow {
        marker: if Some(a.bank_account_id) == selected {
            "*"
        } else {
            ""
        },
        id: a.bank_account_id,
        label: a.label(),
        kind: if a.sub_type.is_empty() {
            a.account_type.clone()
        } else {
            a.sub_type.clone()
        },
        available: a.available_balance.format_with_symbol(symbol),
        current: a.current_balance.format_with_symbol(symbol),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format the computed balances of one account
pub fn format_balance(balance: &Balance, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Balances for account {}\n", balance.bank_account_id));
    output.push_str(&format!(
        "  Safe to spend:  {}\n",
        balance.safe.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Available:      {}\n",
        balance.available.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Current:        {}\n",
        balance.current.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Expenses:       {}\n",
        balance.expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Goals:          {}\n",
        balance.goals.format_with_symbol(symbol)
    ));
    output
}
