//! New expense form
//!
//! Turns the values a user typed into a [`NewSpending`] for the selected
//! bank account and submits it. The form stays open with an error
//! notification when the server refuses, and closes with the created item
//! when it accepts.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use parking_lot::Mutex;

use super::spending::SpendingService;
use crate::api::Backend;
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::models::{
    BankAccountId, FundingScheduleId, Money, NewSpending, RecurrenceRule, Spending, SpendingType,
};
use crate::notification::{Notification, NotificationQueue};
use crate::store::StoreHandle;

/// Raw values entered in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseValues {
    pub name: String,
    /// Decimal amount as typed, e.g. `"12.34"`
    pub amount: String,
    pub next_occurrence: NaiveDate,
    /// Frequency shorthand (`monthly`) or a full rule
    pub recurrence: String,
    /// One of the selected account's funding schedules
    pub funding_schedule_id: FundingScheduleId,
}

impl NewExpenseValues {
    /// Validate and convert into a creation request
    ///
    /// `today` is the user's local date; the next occurrence must be after it.
    pub fn into_new_spending(
        self,
        bank_account_id: BankAccountId,
        today: NaiveDate,
    ) -> SpendlinkResult<NewSpending> {
        self.into_new_spending_in(bank_account_id, today, &Local)
    }

    /// Like [`into_new_spending`](Self::into_new_spending), with the next
    /// occurrence starting at midnight in `zone`
    pub fn into_new_spending_in<Tz: TimeZone>(
        self,
        bank_account_id: BankAccountId,
        today: NaiveDate,
        zone: &Tz,
    ) -> SpendlinkResult<NewSpending> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SpendlinkError::Validation("Name is required".into()));
        }

        let amount = Money::parse(&self.amount)
            .map_err(|e| SpendlinkError::Validation(format!("Invalid amount: {}", e)))?;
        if amount.is_negative() {
            return Err(SpendlinkError::Validation(
                "Amount cannot be negative".into(),
            ));
        }

        if self.next_occurrence <= today {
            return Err(SpendlinkError::Validation(format!(
                "Next occurrence must be after {}",
                today
            )));
        }

        let next_recurrence = zone
            .from_local_datetime(&self.next_occurrence.and_time(NaiveTime::MIN))
            .earliest()
            .ok_or_else(|| {
                SpendlinkError::Validation(format!(
                    "{} has no local midnight",
                    self.next_occurrence
                ))
            })?
            .with_timezone(&Utc);

        // The rule starts at the same instant as the next occurrence
        let recurrence_rule = RecurrenceRule::from_shorthand(&self.recurrence, next_recurrence)
            .map_err(|e| SpendlinkError::Validation(format!("Invalid frequency: {}", e)))?;

        Ok(NewSpending {
            bank_account_id,
            name: name.to_string(),
            next_recurrence,
            spending_type: SpendingType::Expense,
            funding_schedule_id: self.funding_schedule_id,
            target_amount: amount,
            recurrence_rule,
        })
    }
}

/// Holds the submitting flag up until dropped
struct SubmittingGuard<'a>(&'a AtomicBool);

impl<'a> SubmittingGuard<'a> {
    /// `None` when a submission is already in flight
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The expense creation form
pub struct NewExpenseModal<'a> {
    spending: SpendingService<'a>,
    store: &'a StoreHandle,
    submitting: AtomicBool,
    open: AtomicBool,
    notifications: Mutex<NotificationQueue>,
}

impl<'a> NewExpenseModal<'a> {
    pub fn new(backend: &'a dyn Backend, store: &'a StoreHandle) -> Self {
        Self {
            spending: SpendingService::new(backend, store),
            store,
            submitting: AtomicBool::new(false),
            open: AtomicBool::new(true),
            notifications: Mutex::new(NotificationQueue::new()),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Close without submitting anything
    pub fn cancel(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// Submit the form
    ///
    /// Resolves with the created item and closes on success. On any failure
    /// an error notification is queued and the form stays open.
    pub async fn submit(&self, values: NewExpenseValues) -> Option<Spending> {
        if !self.is_open() {
            tracing::debug!("submit on a closed expense form ignored");
            return None;
        }

        let new_spending = match self.build(values) {
            Ok(new_spending) => new_spending,
            Err(e) => {
                self.notify_error(&e);
                return None;
            }
        };

        let Some(_guard) = SubmittingGuard::acquire(&self.submitting) else {
            tracing::debug!("expense submission already in flight");
            return None;
        };

        match self.spending.create(&new_spending).await {
            Ok(created) => {
                self.open.store(false, Ordering::SeqCst);
                Some(created)
            }
            Err(e) => {
                self.notify_error(&e);
                None
            }
        }
    }

    /// Take the queued notifications
    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().drain()
    }

    fn build(&self, values: NewExpenseValues) -> SpendlinkResult<NewSpending> {
        let state = self.store.snapshot();
        let bank_account_id = state.selected_bank_account.ok_or_else(|| {
            SpendlinkError::Validation("Select a bank account first".into())
        })?;

        if !state
            .funding_schedules
            .iter()
            .any(|f| f.funding_schedule_id == values.funding_schedule_id)
        {
            return Err(SpendlinkError::Validation(format!(
                "Funding schedule {} does not belong to this bank account",
                values.funding_schedule_id
            )));
        }

        values.into_new_spending(bank_account_id, Local::now().date_naive())
    }

    /// The server's message is shown as is
    fn notify_error(&self, error: &SpendlinkError) {
        self.notifications
            .lock()
            .push(Notification::error(error.to_string()));
    }
}
