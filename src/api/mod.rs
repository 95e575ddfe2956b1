//! Backend API
//!
//! [`Backend`] is the seam between the client and the server. The
//! production implementation is [`HttpBackend`]; tests drive services with a
//! scripted fake instead.

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::error::SpendlinkResult;
use crate::models::{
    Balance, BankAccount, BankAccountId, FundingSchedule, Link, LinkId, NewSpending, Spending,
    Transaction,
};

pub use client::HttpBackend;
pub use types::{
    InstitutionMetadata, LinkCallbackRequest, LinkCallbackResponse, LoginResponse, MeResponse,
};

/// Answer from the link setup long poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStatus {
    /// Initial data has been pulled (200)
    Ready,
    /// The server timed out waiting (408); ask again
    NotReady,
}

/// Operations the client needs from the server
#[async_trait]
pub trait Backend: Send + Sync {
    /// Use `token` to authenticate the following requests
    fn set_token(&self, _token: Option<String>) {}

    async fn login(&self, email: &str, password: &str) -> SpendlinkResult<LoginResponse>;

    async fn logout(&self) -> SpendlinkResult<()>;

    async fn me(&self) -> SpendlinkResult<MeResponse>;

    /// Request a token for the bank link widget
    async fn new_link_token(&self) -> SpendlinkResult<String>;

    /// Exchange the widget's public token for a new link
    async fn link_token_callback(
        &self,
        request: &LinkCallbackRequest,
    ) -> SpendlinkResult<LinkCallbackResponse>;

    /// One long-poll request against the link setup status
    async fn wait_for_link_setup(&self, link_id: LinkId) -> SpendlinkResult<SetupStatus>;

    async fn create_spending(&self, spending: &NewSpending) -> SpendlinkResult<Spending>;

    async fn list_links(&self) -> SpendlinkResult<Vec<Link>>;

    async fn list_bank_accounts(&self) -> SpendlinkResult<Vec<BankAccount>>;

    async fn list_transactions(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Vec<Transaction>>;

    async fn list_funding_schedules(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Vec<FundingSchedule>>;

    async fn list_spending(&self, bank_account_id: BankAccountId)
        -> SpendlinkResult<Vec<Spending>>;

    async fn get_balances(&self, bank_account_id: BankAccountId) -> SpendlinkResult<Balance>;
}
