//! Spending service
//!
//! Creates spending items on the server. The store only changes once the
//! server has answered with the stored record.

use crate::api::Backend;
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::models::{NewSpending, Spending};
use crate::store::{Action, StoreHandle};

pub struct SpendingService<'a> {
    backend: &'a dyn Backend,
    store: &'a StoreHandle,
}

impl<'a> SpendingService<'a> {
    pub fn new(backend: &'a dyn Backend, store: &'a StoreHandle) -> Self {
        Self { backend, store }
    }

    /// Create a spending item and add the server's record to the store
    pub async fn create(&self, spending: &NewSpending) -> SpendlinkResult<Spending> {
        if spending.target_amount.is_negative() {
            return Err(SpendlinkError::Validation(
                "Amount cannot be negative".into(),
            ));
        }

        let created = self.backend.create_spending(spending).await?;
        tracing::info!(
            spending_id = %created.spending_id,
            bank_account_id = %created.bank_account_id,
            "spending created"
        );

        self.store
            .dispatch(Action::SpendingCreated(created.clone()))
            .await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::models::{
        BankAccountId, FundingScheduleId, Money, RecurrenceRule, SpendingId, SpendingType,
    };
    use crate::store::AppState;
    use chrono::{TimeZone, Utc};

    fn new_spending(amount: i64) -> NewSpending {
        NewSpending {
            bank_account_id: BankAccountId::new(1),
            name: "Netflix".into(),
            next_recurrence: Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap(),
            spending_type: SpendingType::Expense,
            funding_schedule_id: FundingScheduleId::new(3),
            target_amount: Money::from_cents(amount),
            recurrence_rule: RecurrenceRule::parse("FREQ=MONTHLY").unwrap(),
        }
    }

    async fn selected_store(backend: &FakeBackend) -> StoreHandle {
        let store = StoreHandle::spawn(AppState::default(), vec![]);
        let accounts = backend.list_bank_accounts().await.unwrap();
        store
            .dispatch(Action::BankAccountsLoaded(accounts))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_adds_server_record() {
        let backend = FakeBackend::happy();
        let store = selected_store(&backend).await;
        let service = SpendingService::new(&backend, &store);

        let created = service.create(&new_spending(1599)).await.unwrap();

        assert_eq!(created.spending_id, SpendingId::new(100));
        assert_eq!(store.snapshot().spending.as_slice(), &[created]);
    }

    #[tokio::test]
    async fn test_failed_create_does_not_touch_store() {
        let backend = FakeBackend::happy();
        *backend.create_error.lock() = Some((400, "name is required".into()));
        let store = selected_store(&backend).await;
        let service = SpendingService::new(&backend, &store);

        let err = service.create(&new_spending(1599)).await.unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert!(store.snapshot().spending.is_empty());
    }

    #[tokio::test]
    async fn test_negative_amount_rejected_locally() {
        let backend = FakeBackend::happy();
        let store = selected_store(&backend).await;
        let service = SpendingService::new(&backend, &store);

        assert!(service.create(&new_spending(-1)).await.unwrap_err().is_validation());
        assert_eq!(backend.count("create_spending"), 0);
    }
}
