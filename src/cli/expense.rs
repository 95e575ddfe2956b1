//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::print_notifications;
use crate::api::Backend;
use crate::config::Settings;
use crate::display::{format_spending_created, format_spending_list};
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::models::{BankAccountId, FundingScheduleId};
use crate::services::{AuthService, CollectionsService, NewExpenseModal, NewExpenseValues};
use crate::store::StoreHandle;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Create a new recurring expense
    Create {
        /// What you are budgeting for
        name: String,
        /// How much you need (e.g., "15.99")
        amount: String,
        /// When you need it next (YYYY-MM-DD, after today)
        #[arg(short, long)]
        due: NaiveDate,
        /// daily, weekly, biweekly, monthly, quarterly, yearly, or a full rule
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// Funding schedule ID (see 'spendlink account schedules')
        #[arg(short = 's', long)]
        funding_schedule: u64,
        /// Bank account ID (defaults to the selected account)
        #[arg(short, long)]
        account: Option<u64>,
    },
    /// List expenses and goals for a bank account
    List {
        /// Bank account ID (defaults to the selected account)
        #[arg(short, long)]
        account: Option<u64>,
    },
}

/// Handle an expense command
pub async fn handle_expense_command(
    backend: &dyn Backend,
    store: &StoreHandle,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> SpendlinkResult<()> {
    AuthService::new(backend, store).require_authenticated()?;
    let collections = CollectionsService::new(backend, store);
    collections.refresh_all().await?;

    match cmd {
        ExpenseCommands::Create {
            name,
            amount,
            due,
            frequency,
            funding_schedule,
            account,
        } => {
            if let Some(id) = account {
                collections
                    .select_bank_account(BankAccountId::new(id))
                    .await?;
            }

            let modal = NewExpenseModal::new(backend, store);
            let created = modal
                .submit(NewExpenseValues {
                    name,
                    amount,
                    next_occurrence: due,
                    recurrence: frequency,
                    funding_schedule_id: FundingScheduleId::new(funding_schedule),
                })
                .await;
            print_notifications(modal.drain_notifications());

            match created {
                Some(spending) => {
                    println!(
                        "{}",
                        format_spending_created(
                            &spending,
                            &settings.currency_symbol,
                            &settings.date_format
                        )
                    );
                    Ok(())
                }
                None => Err(SpendlinkError::Validation(
                    "Expense was not created".into(),
                )),
            }
        }

        ExpenseCommands::List { account } => {
            let state = match account {
                Some(id) => {
                    collections
                        .select_bank_account(BankAccountId::new(id))
                        .await?
                }
                None => store.snapshot(),
            };

            if let Some(selected) = state.selected_bank_account() {
                println!("{}", selected.label());
            }
            println!(
                "{}",
                format_spending_list(
                    &state.spending,
                    &state.funding_schedules,
                    &settings.currency_symbol,
                    &settings.date_format
                )
            );
            Ok(())
        }
    }
}
