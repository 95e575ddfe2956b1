//! Actions accepted by the store

use crate::auth::LoginPayload;
use crate::models::{
    Balance, BankAccount, BankAccountId, FundingSchedule, Link, Spending, Transaction,
};

/// A typed state change request
#[derive(Debug, Clone)]
pub enum Action {
    /// Merge login details into the authentication state
    BootstrapLogin(LoginPayload),
    /// The account's subscription became active
    ActivateSubscription,
    Logout,
    LinksLoaded(Vec<Link>),
    BankAccountsLoaded(Vec<BankAccount>),
    SelectBankAccount(BankAccountId),
    TransactionsLoaded {
        bank_account_id: BankAccountId,
        transactions: Vec<Transaction>,
    },
    FundingSchedulesLoaded {
        bank_account_id: BankAccountId,
        funding_schedules: Vec<FundingSchedule>,
    },
    SpendingLoaded {
        bank_account_id: BankAccountId,
        spending: Vec<Spending>,
    },
    /// The server confirmed a new spending item
    SpendingCreated(Spending),
    BalancesLoaded(Balance),
}

impl Action {
    /// Stable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::BootstrapLogin(_) => "BOOTSTRAP_LOGIN",
            Self::ActivateSubscription => "ACTIVATE_SUBSCRIPTION",
            Self::Logout => "LOGOUT",
            Self::LinksLoaded(_) => "LINKS_LOADED",
            Self::BankAccountsLoaded(_) => "BANK_ACCOUNTS_LOADED",
            Self::SelectBankAccount(_) => "SELECT_BANK_ACCOUNT",
            Self::TransactionsLoaded { .. } => "TRANSACTIONS_LOADED",
            Self::FundingSchedulesLoaded { .. } => "FUNDING_SCHEDULES_LOADED",
            Self::SpendingLoaded { .. } => "SPENDING_LOADED",
            Self::SpendingCreated(_) => "SPENDING_CREATED",
            Self::BalancesLoaded(_) => "BALANCES_LOADED",
        }
    }
}
