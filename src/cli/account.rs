//! Bank account CLI commands

use std::sync::Arc;

use clap::Subcommand;

use crate::api::Backend;
use crate::config::Settings;
use crate::display::{format_balance, format_bank_account_list, format_funding_schedule_list};
use crate::error::SpendlinkResult;
use crate::models::BankAccountId;
use crate::services::{AuthService, CollectionsService};
use crate::store::{AppState, StoreHandle};

/// Bank account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// List bank accounts from every link
    List,
    /// Show computed balances for a bank account
    Balance {
        /// Bank account ID (defaults to the first account)
        account: Option<u64>,
    },
    /// List the funding schedules expenses can draw from
    Schedules {
        /// Bank account ID (defaults to the first account)
        account: Option<u64>,
    },
}

/// Handle a bank account command
pub async fn handle_account_command(
    backend: &dyn Backend,
    store: &StoreHandle,
    settings: &Settings,
    cmd: AccountCommands,
) -> SpendlinkResult<()> {
    AuthService::new(backend, store).require_authenticated()?;
    let collections = CollectionsService::new(backend, store);

    match cmd {
        AccountCommands::List => {
            collections.refresh_bank_accounts().await?;
            let state = store.snapshot();
            println!(
                "{}",
                format_bank_account_list(
                    &state.bank_accounts,
                    state.selected_bank_account,
                    &settings.currency_symbol
                )
            );
        }
        AccountCommands::Balance { account } => {
            let Some(state) = load_account(&collections, account).await? else {
                return Ok(());
            };

            if let Some(balance) = &state.balances {
                print!("{}", format_balance(balance, &settings.currency_symbol));
            }
        }
        AccountCommands::Schedules { account } => {
            let Some(state) = load_account(&collections, account).await? else {
                return Ok(());
            };

            println!(
                "{}",
                format_funding_schedule_list(&state.funding_schedules, &settings.date_format)
            );
        }
    }

    Ok(())
}

/// Refresh `account`, or the first account, with everything it owns
async fn load_account(
    collections: &CollectionsService<'_>,
    account: Option<u64>,
) -> SpendlinkResult<Option<Arc<AppState>>> {
    match (collections.refresh_bank_accounts().await?, account) {
        (_, Some(id)) => collections
            .select_bank_account(BankAccountId::new(id))
            .await
            .map(Some),
        (Some(selected), None) => collections.refresh_account_data(selected).await.map(Some),
        (None, None) => {
            println!("No bank accounts found. Run 'spendlink setup' to link a bank.");
            Ok(None)
        }
    }
}
