//! Application reducer
//!
//! Delegates the authentication slice to [`crate::auth::reduce`] and
//! replaces collection slices when their data arrives. Collections scoped to
//! a bank account are dropped when the selection changes, and data that
//! arrives for an account that is no longer selected is ignored.

use std::sync::Arc;

use super::{Action, AppState};
use crate::auth;
use crate::models::BankAccountId;

/// Apply `action` to the whole application state
pub fn reduce(state: &Arc<AppState>, action: &Action) -> Arc<AppState> {
    let auth = auth::reduce(&state.auth, action);

    match action {
        Action::BootstrapLogin(_) | Action::ActivateSubscription => Arc::new(AppState {
            auth,
            ..AppState::clone(state)
        }),

        Action::Logout => Arc::new(AppState {
            auth,
            ..AppState::default()
        }),

        Action::LinksLoaded(links) => Arc::new(AppState {
            links: Arc::new(links.clone()),
            ..AppState::clone(state)
        }),

        Action::BankAccountsLoaded(accounts) => {
            let selected = state
                .selected_bank_account
                .filter(|id| accounts.iter().any(|a| a.bank_account_id == *id))
                .or_else(|| accounts.first().map(|a| a.bank_account_id));

            let next = AppState {
                bank_accounts: Arc::new(accounts.clone()),
                ..AppState::clone(state)
            };
            Arc::new(select(next, selected))
        }

        Action::SelectBankAccount(id) => {
            if state.selected_bank_account == Some(*id) {
                return Arc::clone(state);
            }
            Arc::new(select(AppState::clone(state), Some(*id)))
        }

        Action::TransactionsLoaded {
            bank_account_id,
            transactions,
        } => {
            if !is_selected(state, *bank_account_id) {
                return Arc::clone(state);
            }
            Arc::new(AppState {
                transactions: Arc::new(transactions.clone()),
                ..AppState::clone(state)
            })
        }

        Action::FundingSchedulesLoaded {
            bank_account_id,
            funding_schedules,
        } => {
            if !is_selected(state, *bank_account_id) {
                return Arc::clone(state);
            }
            Arc::new(AppState {
                funding_schedules: Arc::new(funding_schedules.clone()),
                ..AppState::clone(state)
            })
        }

        Action::SpendingLoaded {
            bank_account_id,
            spending,
        } => {
            if !is_selected(state, *bank_account_id) {
                return Arc::clone(state);
            }
            Arc::new(AppState {
                spending: Arc::new(spending.clone()),
                ..AppState::clone(state)
            })
        }

        Action::SpendingCreated(created) => {
            if !is_selected(state, created.bank_account_id) {
                return Arc::clone(state);
            }
            let mut spending: Vec<_> = state
                .spending
                .iter()
                .filter(|s| s.spending_id != created.spending_id)
                .cloned()
                .collect();
            spending.push(created.clone());

            Arc::new(AppState {
                spending: Arc::new(spending),
                ..AppState::clone(state)
            })
        }

        Action::BalancesLoaded(balance) => {
            if !is_selected(state, balance.bank_account_id) {
                return Arc::clone(state);
            }
            Arc::new(AppState {
                balances: Some(Arc::new(balance.clone())),
                ..AppState::clone(state)
            })
        }
    }
}

fn is_selected(state: &AppState, bank_account_id: BankAccountId) -> bool {
    state.selected_bank_account == Some(bank_account_id)
}

/// Point the selection at `selected`, clearing account-scoped data if it moved
fn select(state: AppState, selected: Option<BankAccountId>) -> AppState {
    if state.selected_bank_account == selected {
        return state;
    }
    AppState {
        selected_bank_account: selected,
        transactions: Arc::default(),
        funding_schedules: Arc::default(),
        spending: Arc::default(),
        balances: None,
        ..state
    }
}
