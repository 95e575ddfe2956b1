//! Client-side state store
//!
//! All domain state the client knows about lives in one immutable
//! [`AppState`] snapshot. A single task owns it and applies [`Action`]s one
//! at a time through [`reducer::reduce`]; everything else talks to it
//! through a cloneable [`StoreHandle`].

pub mod action;
pub mod handle;
pub mod reducer;

use std::sync::Arc;

use crate::auth::AuthenticationState;
use crate::models::{
    Balance, BankAccount, BankAccountId, FundingSchedule, Link, Spending, Transaction,
};

pub use action::Action;
pub use handle::StoreHandle;

/// One immutable snapshot of everything the client knows
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub auth: Arc<AuthenticationState>,
    pub links: Arc<Vec<Link>>,
    pub bank_accounts: Arc<Vec<BankAccount>>,
    pub selected_bank_account: Option<BankAccountId>,
    /// The following collections belong to the selected bank account
    pub transactions: Arc<Vec<Transaction>>,
    pub funding_schedules: Arc<Vec<FundingSchedule>>,
    pub spending: Arc<Vec<Spending>>,
    pub balances: Option<Arc<Balance>>,
}

impl AppState {
    /// Fresh state around an existing authentication slice
    pub fn with_auth(auth: AuthenticationState) -> Self {
        Self {
            auth: Arc::new(auth),
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated
    }

    /// The selected bank account record, if it is loaded
    pub fn selected_bank_account(&self) -> Option<&BankAccount> {
        let selected = self.selected_bank_account?;
        self.bank_accounts
            .iter()
            .find(|account| account.bank_account_id == selected)
    }
}
