//! HTTP implementation of [`Backend`]

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::types::{
    ApiErrorBody, LinkCallbackRequest, LinkCallbackResponse, LinkTokenResponse, LoginRequest,
    LoginResponse, MeResponse,
};
use super::{Backend, SetupStatus};
use crate::config::Settings;
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::models::{
    Balance, BankAccount, BankAccountId, FundingSchedule, Link, LinkId, NewSpending, Spending,
    Transaction,
};

/// Page size used for the first transactions request
const INITIAL_TRANSACTIONS_LIMIT: u32 = 25;

/// Talks to the server over HTTP with `reqwest`
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    long_poll_timeout: Duration,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    /// Build a client from the user's settings
    pub fn new(settings: &Settings) -> SpendlinkResult<Self> {
        Self::with_base_url(
            &settings.api_base_url,
            settings.request_timeout(),
            settings.long_poll_timeout(),
        )
    }

    pub fn with_base_url(
        base_url: &str,
        request_timeout: Duration,
        long_poll_timeout: Duration,
    ) -> SpendlinkResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("spendlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpendlinkError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            long_poll_timeout,
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.token.read().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> SpendlinkResult<T> {
        let response = error_for_status(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> SpendlinkResult<()> {
        error_for_status(builder.send().await?).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`SpendlinkError::Api`]
async fn error_for_status(response: Response) -> SpendlinkResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    tracing::debug!(status = status.as_u16(), %message, "request rejected");
    Err(SpendlinkError::api(status.as_u16(), message))
}

/// The server's `error` field, or the status reason when the body has none
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

#[async_trait]
impl Backend for HttpBackend {
    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    async fn login(&self, email: &str, password: &str) -> SpendlinkResult<LoginResponse> {
        let builder = self
            .request(Method::POST, "/authentication/login")
            .json(&LoginRequest { email, password });
        self.send_json(builder).await
    }

    async fn logout(&self) -> SpendlinkResult<()> {
        self.send_empty(self.request(Method::GET, "/authentication/logout"))
            .await
    }

    async fn me(&self) -> SpendlinkResult<MeResponse> {
        self.send_json(self.request(Method::GET, "/users/me")).await
    }

    async fn new_link_token(&self) -> SpendlinkResult<String> {
        let response: LinkTokenResponse = self
            .send_json(self.request(Method::GET, "/plaid/link/token/new"))
            .await?;
        Ok(response.link_token)
    }

    async fn link_token_callback(
        &self,
        request: &LinkCallbackRequest,
    ) -> SpendlinkResult<LinkCallbackResponse> {
        let builder = self
            .request(Method::POST, "/plaid/link/token/callback")
            .json(request);
        self.send_json(builder).await
    }

    async fn wait_for_link_setup(&self, link_id: LinkId) -> SpendlinkResult<SetupStatus> {
        let builder = self
            .request(Method::GET, &format!("/plaid/link/setup/wait/{}", link_id))
            .timeout(self.long_poll_timeout);

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::debug!(%link_id, "long poll timed out on the client side");
                return Ok(SetupStatus::NotReady);
            }
            Err(e) => return Err(e.into()),
        };

        if response.status() == StatusCode::REQUEST_TIMEOUT {
            return Ok(SetupStatus::NotReady);
        }

        error_for_status(response).await?;
        Ok(SetupStatus::Ready)
    }

    async fn create_spending(&self, spending: &NewSpending) -> SpendlinkResult<Spending> {
        let path = format!("/bank_accounts/{}/spending", spending.bank_account_id);
        self.send_json(self.request(Method::POST, &path).json(spending))
            .await
    }

    async fn list_links(&self) -> SpendlinkResult<Vec<Link>> {
        self.send_json(self.request(Method::GET, "/links")).await
    }

    async fn list_bank_accounts(&self) -> SpendlinkResult<Vec<BankAccount>> {
        self.send_json(self.request(Method::GET, "/bank_accounts"))
            .await
    }

    async fn list_transactions(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Vec<Transaction>> {
        let path = format!("/bank_accounts/{}/transactions", bank_account_id);
        let builder = self
            .request(Method::GET, &path)
            .query(&[("limit", INITIAL_TRANSACTIONS_LIMIT), ("offset", 0)]);
        self.send_json(builder).await
    }

    async fn list_funding_schedules(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Vec<FundingSchedule>> {
        let path = format!("/bank_accounts/{}/funding_schedules", bank_account_id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn list_spending(
        &self,
        bank_account_id: BankAccountId,
    ) -> SpendlinkResult<Vec<Spending>> {
        let path = format!("/bank_accounts/{}/spending", bank_account_id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn get_balances(&self, bank_account_id: BankAccountId) -> SpendlinkResult<Balance> {
        let path = format!("/bank_accounts/{}/balances", bank_account_id);
        self.send_json(self.request(Method::GET, &path)).await
    }
}
