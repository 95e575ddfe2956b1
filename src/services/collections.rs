//! Collection refreshes
//!
//! Links and bank accounts are independent, so they load side by side. The
//! per-account collections need a selected account and start once bank
//! accounts have arrived.

use std::sync::Arc;

use crate::api::Backend;
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::models::BankAccountId;
use crate::store::{Action, AppState, StoreHandle};

pub struct CollectionsService<'a> {
    backend: &'a dyn Backend,
    store: &'a StoreHandle,
}

impl<'a> CollectionsService<'a> {
    pub fn new(backend: &'a dyn Backend, store: &'a StoreHandle) -> Self {
        Self { backend, store }
    }

    pub async fn refresh_links(&self) -> SpendlinkResult<Arc<AppState>> {
        let links = self.backend.list_links().await?;
        self.store.dispatch(Action::LinksLoaded(links)).await
    }

    /// Load bank accounts, returning the account selected afterwards
    pub async fn refresh_bank_accounts(&self) -> SpendlinkResult<Option<BankAccountId>> {
        let accounts = self.backend.list_bank_accounts().await?;
        let state = self
            .store
            .dispatch(Action::BankAccountsLoaded(accounts))
            .await?;
        Ok(state.selected_bank_account)
    }

    /// Load everything scoped to one bank account, concurrently
    pub async fn refresh_account_data(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Arc<AppState>> {
        let (transactions, funding_schedules, spending, balance) = futures::try_join!(
            self.backend.list_transactions(bank_account_id),
            self.backend.list_funding_schedules(bank_account_id),
            self.backend.list_spending(bank_account_id),
            self.backend.get_balances(bank_account_id),
        )?;

        self.store
            .dispatch(Action::TransactionsLoaded {
                bank_account_id,
                transactions,
            })
            .await?;
        self.store
            .dispatch(Action::FundingSchedulesLoaded {
                bank_account_id,
                funding_schedules,
            })
            .await?;
        self.store
            .dispatch(Action::SpendingLoaded {
                bank_account_id,
                spending,
            })
            .await?;
        self.store.dispatch(Action::BalancesLoaded(balance)).await
    }

    /// Refresh every collection the client keeps
    pub async fn refresh_all(&self) -> SpendlinkResult<Arc<AppState>> {
        let accounts_then_data = async {
            match self.refresh_bank_accounts().await? {
                Some(bank_account_id) => {
                    self.refresh_account_data(bank_account_id).await?;
                }
                None => tracing::debug!("no bank accounts yet; skipping account data"),
            }
            Ok::<_, SpendlinkError>(())
        };

        futures::try_join!(self.refresh_links(), accounts_then_data)?;

        let state = self.store.snapshot();
        tracing::debug!(
            links = state.links.len(),
            bank_accounts = state.bank_accounts.len(),
            "collections refreshed"
        );
        Ok(state)
    }

    /// Switch the selected account and load its data
    pub async fn select_bank_account(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Arc<AppState>> {
        let known = self
            .store
            .snapshot()
            .bank_accounts
            .iter()
            .any(|a| a.bank_account_id == bank_account_id);
        if !known {
            return Err(SpendlinkError::bank_account_not_found(
                bank_account_id.to_string(),
            ));
        }

        self.store
            .dispatch(Action::SelectBankAccount(bank_account_id))
            .await?;
        self.refresh_account_data(bank_account_id).await
    }
}
