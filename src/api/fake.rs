//! Scripted in-memory backend for service tests

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use super::types::{LinkCallbackRequest, LinkCallbackResponse, LoginResponse, MeResponse};
use super::{Backend, SetupStatus};
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::models::{
    AccountId, Balance, BankAccount, BankAccountId, FundingSchedule, FundingScheduleId, Link,
    LinkId, LinkStatus, LinkType, Money, NewSpending, Spending, SpendingId, Transaction,
    TransactionId, User, UserId,
};

/// One scripted answer to the setup long poll
#[derive(Debug, Clone)]
pub(crate) enum PollReply {
    Ready,
    NotReady,
    Fail(u16, &'static str),
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub link_token: Mutex<Option<String>>,
    pub callback_error: Mutex<Option<(u16, String)>>,
    pub poll_replies: Mutex<VecDeque<PollReply>>,
    pub create_error: Mutex<Option<(u16, String)>>,
    pub is_active: Mutex<bool>,
    pub bank_accounts: Mutex<Vec<BankAccount>>,

    pub calls: Mutex<Vec<String>>,
    pub callback_requests: Mutex<Vec<LinkCallbackRequest>>,
    pub created: Mutex<Vec<NewSpending>>,
}

impl FakeBackend {
    /// A backend where everything succeeds and one bank account exists
    pub fn happy() -> Self {
        let fake = Self::default();
        *fake.link_token.lock() = Some("link-sandbox-123".into());
        *fake.bank_accounts.lock() = vec![bank_account(1)];
        fake
    }

    pub fn with_poll_replies(self, replies: Vec<PollReply>) -> Self {
        *self.poll_replies.lock() = replies.into();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == name).count()
    }

    fn record(&self, name: &str) {
        self.calls.lock().push(name.to_string());
    }
}

pub(crate) fn user() -> User {
    User {
        user_id: UserId::new(5),
        account_id: AccountId::new(500),
        first_name: "Riley".into(),
        last_name: "Quinn".into(),
    }
}

pub(crate) fn bank_account(id: u64) -> BankAccount {
    BankAccount {
        bank_account_id: BankAccountId::new(id),
        link_id: LinkId::new(9),
        name: format!("Checking {}", id),
        mask: Some("0000".into()),
        available_balance: Money::from_cents(10_000),
        current_balance: Money::from_cents(12_000),
        account_type: "depository".into(),
        sub_type: "checking".into(),
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> SpendlinkResult<LoginResponse> {
        self.record("login");
        if email.is_empty() || password != "correct horse" {
            return Err(SpendlinkError::api(403, "invalid email and password"));
        }
        Ok(LoginResponse {
            token: "session-token".into(),
            is_active: *self.is_active.lock(),
        })
    }

    async fn logout(&self) -> SpendlinkResult<()> {
        self.record("logout");
        Ok(())
    }

    async fn me(&self) -> SpendlinkResult<MeResponse> {
        self.record("me");
        Ok(MeResponse {
            user: user(),
            is_active: *self.is_active.lock(),
            is_setup: true,
        })
    }

    async fn new_link_token(&self) -> SpendlinkResult<String> {
        self.record("new_link_token");
        self.link_token
            .lock()
            .clone()
            .ok_or_else(|| SpendlinkError::api(500, "failed to create link token"))
    }

    async fn link_token_callback(
        &self,
        request: &LinkCallbackRequest,
    ) -> SpendlinkResult<LinkCallbackResponse> {
        self.record("link_token_callback");
        self.callback_requests.lock().push(request.clone());
        if let Some((status, message)) = self.callback_error.lock().clone() {
            return Err(SpendlinkError::api(status, message));
        }
        Ok(LinkCallbackResponse {
            link_id: LinkId::new(9),
            job_id: None,
        })
    }

    async fn wait_for_link_setup(&self, _link_id: LinkId) -> SpendlinkResult<SetupStatus> {
        self.record("wait_for_link_setup");
        let reply = self
            .poll_replies
            .lock()
            .pop_front()
            .unwrap_or(PollReply::NotReady);
        match reply {
            PollReply::Ready => Ok(SetupStatus::Ready),
            PollReply::NotReady => Ok(SetupStatus::NotReady),
            PollReply::Fail(status, message) => Err(SpendlinkError::api(status, message)),
        }
    }

    async fn create_spending(&self, spending: &NewSpending) -> SpendlinkResult<Spending> {
        self.record("create_spending");
        if let Some((status, message)) = self.create_error.lock().clone() {
            return Err(SpendlinkError::api(status, message));
        }
        self.created.lock().push(spending.clone());
        Ok(Spending {
            spending_id: SpendingId::new(100),
            bank_account_id: spending.bank_account_id,
            name: spending.name.clone(),
            next_recurrence: spending.next_recurrence,
            spending_type: spending.spending_type,
            funding_schedule_id: spending.funding_schedule_id,
            target_amount: spending.target_amount,
            current_amount: Money::zero(),
            used_amount: Money::zero(),
            recurrence_rule: Some(spending.recurrence_rule.clone()),
            is_behind: false,
            date_created: None,
        })
    }

    async fn list_links(&self) -> SpendlinkResult<Vec<Link>> {
        self.record("list_links");
        Ok(vec![Link {
            link_id: LinkId::new(9),
            link_type: LinkType::Plaid,
            link_status: LinkStatus::Setup,
            institution_name: "First Platypus Bank".into(),
        }])
    }

    async fn list_bank_accounts(&self) -> SpendlinkResult<Vec<BankAccount>> {
        self.record("list_bank_accounts");
        Ok(self.bank_accounts.lock().clone())
    }

    async fn list_transactions(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Vec<Transaction>> {
        self.record("list_transactions");
        Ok(vec![Transaction {
            transaction_id: TransactionId::new(1),
            bank_account_id,
            amount: Money::from_cents(899),
            name: "Coffee".into(),
            date: Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
            is_pending: false,
            spending_id: None,
        }])
    }

    async fn list_funding_schedules(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Vec<FundingSchedule>> {
        self.record("list_funding_schedules");
        Ok(vec![FundingSchedule {
            funding_schedule_id: FundingScheduleId::new(3),
            bank_account_id,
            name: "Payday".into(),
            description: "15th and last day".into(),
            rule: "FREQ=MONTHLY;BYMONTHDAY=15,-1".into(),
            next_occurrence: Utc.with_ymd_and_hms(2026, 10, 31, 0, 0, 0).unwrap(),
        }])
    }

    async fn list_spending(
        &self,
        _bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Vec<Spending>> {
        self.record("list_spending");
        Ok(vec![])
    }

    async fn get_balances(&self, bank_account_id: BankAccountId) -> SpendlinkResult<Balance> {
        self.record("get_balances");
        Ok(Balance {
            bank_account_id,
            current: Money::from_cents(12_000),
            available: Money::from_cents(10_000),
            safe: Money::from_cents(8_000),
            expenses: Money::from_cents(2_000),
            goals: Money::zero(),
        })
    }
}
