//! Drives the setup wizard
//!
//! The runner performs the wizard's effects against the backend and the
//! store, and asks a [`SetupHost`] whenever the user has to decide
//! something. It owns the setup session for as long as it runs.

use std::collections::VecDeque;

use async_trait::async_trait;

use super::poll::{wait_for_setup, PollOutcome, PollPolicy};
use super::wizard::{self, Effect, LinkTokenStatus, WizardEvent, WizardState};
use crate::api::{Backend, InstitutionMetadata};
use crate::error::SpendlinkResult;
use crate::models::LinkId;
use crate::notification::Notification;
use crate::services::{AuthService, CollectionsService};
use crate::store::StoreHandle;

/// What the user picked on the intro step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroChoice {
    Link,
    Manual,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualChoice {
    Back,
    Continue,
}

/// The environment the wizard runs in
#[async_trait]
pub trait SetupHost: Send + Sync {
    /// Show the current step
    fn render(&self, state: &WizardState);

    async fn choose_intro(&self, link: &LinkTokenStatus) -> SpendlinkResult<IntroChoice>;

    async fn choose_manual(&self) -> SpendlinkResult<ManualChoice>;

    /// Run the bank link widget with `link_token`
    ///
    /// Returns the public token and institution details on success, `None`
    /// when the user closed the widget.
    async fn open_link(
        &self,
        link_token: &str,
    ) -> SpendlinkResult<Option<(String, InstitutionMetadata)>>;
}

/// Transient data held while the wizard runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupSession {
    pub link_token: Option<String>,
    pub link_id: Option<LinkId>,
    pub poll_attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub state: WizardState,
    pub session: SetupSession,
}

impl SetupReport {
    /// A bank was linked, or the manual path was taken
    pub fn completed(&self) -> bool {
        matches!(
            self.state,
            WizardState::Complete { .. } | WizardState::ManualComplete
        )
    }

    pub fn poll(&self) -> Option<&PollOutcome> {
        match &self.state {
            WizardState::Complete { poll, .. } => Some(poll),
            _ => None,
        }
    }

    /// What the user should be told about how setup ended
    pub fn notifications(&self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        match &self.state {
            WizardState::Complete { poll, .. } => {
                match poll {
                    PollOutcome::Ready { .. } => {}
                    PollOutcome::CeilingReached { attempts } => {
                        notifications.push(Notification::warning(format!(
                            "Your bank is still importing after {} checks; some data may appear later.",
                            attempts
                        )))
                    }
                    PollOutcome::Failed { error, .. } => notifications.push(
                        Notification::warning(format!("Could not confirm the import: {}", error)),
                    ),
                }
                notifications.push(Notification::success("Setup complete!"));
            }
            WizardState::ManualComplete => {
                notifications.push(Notification::success("Setup complete!"))
            }
            WizardState::Cancelled => notifications.push(Notification::info(
                "Setup cancelled. You have been logged out.",
            )),
            WizardState::Failed { message } => {
                notifications.push(Notification::error(format!("Setup failed: {}", message)))
            }
            _ => {}
        }
        notifications
    }
}

pub struct SetupRunner<'a> {
    backend: &'a dyn Backend,
    store: &'a StoreHandle,
    host: &'a dyn SetupHost,
    policy: PollPolicy,
}

impl<'a> SetupRunner<'a> {
    pub fn new(backend: &'a dyn Backend, store: &'a StoreHandle, host: &'a dyn SetupHost) -> Self {
        Self {
            backend,
            store,
            host,
            policy: PollPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the wizard until it reaches a terminal state
    pub async fn run(&self) -> SpendlinkResult<SetupReport> {
        let mut session = SetupSession::default();
        let (mut state, mut effects) = wizard::start();

        loop {
            let mut pending: VecDeque<Effect> = effects.into();
            while let Some(effect) = pending.pop_front() {
                self.host.render(&state);
                if let Some(event) = self.execute(effect, &mut session).await? {
                    let (next, more) = wizard::transition(state, event);
                    state = next;
                    pending.extend(more);
                }
            }

            self.host.render(&state);
            if state.is_terminal() {
                break;
            }

            let Some(event) = self.ask(&state).await? else {
                break;
            };
            let (next, more) = wizard::transition(state, event);
            state = next;
            effects = more;
        }

        tracing::info!(
            state = state.name(),
            poll_attempts = session.poll_attempts,
            "setup finished"
        );
        Ok(SetupReport { state, session })
    }

    async fn execute(
        &self,
        effect: Effect,
        session: &mut SetupSession,
    ) -> SpendlinkResult<Option<WizardEvent>> {
        let event = match effect {
            Effect::FetchLinkToken => match self.backend.new_link_token().await {
                Ok(token) => {
                    session.link_token = Some(token.clone());
                    WizardEvent::LinkTokenLoaded(token)
                }
                Err(e) => WizardEvent::LinkTokenFailed(e.to_string()),
            },

            Effect::ExchangeToken(request) => {
                match self.backend.link_token_callback(&request).await {
                    Ok(response) => {
                        session.link_id = Some(response.link_id);
                        WizardEvent::TokenExchanged(response.link_id)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "public token exchange failed");
                        WizardEvent::ExchangeFailed(e.to_string())
                    }
                }
            }

            Effect::PollSetup(link_id) => {
                let outcome = wait_for_setup(self.backend, link_id, &self.policy).await;
                session.poll_attempts = outcome.attempts();
                WizardEvent::PollFinished(outcome)
            }

            Effect::RefreshCollections => {
                match CollectionsService::new(self.backend, self.store)
                    .refresh_all()
                    .await
                {
                    Ok(_) => WizardEvent::CollectionsRefreshed,
                    Err(e) => {
                        tracing::warn!(error = %e, "refresh after setup failed");
                        WizardEvent::RefreshFailed(e.to_string())
                    }
                }
            }

            Effect::Logout => {
                AuthService::new(self.backend, self.store).logout().await?;
                return Ok(None);
            }
        };

        Ok(Some(event))
    }

    /// Ask the host for the next user decision, if the state needs one
    async fn ask(&self, state: &WizardState) -> SpendlinkResult<Option<WizardEvent>> {
        let event = match state {
            WizardState::Intro { link } => match self.host.choose_intro(link).await? {
                IntroChoice::Manual => WizardEvent::ChooseManual,
                IntroChoice::Cancel => WizardEvent::Cancel,
                IntroChoice::Link => match link.widget_token() {
                    Some(token) => match self.host.open_link(token).await? {
                        Some((public_token, metadata)) => WizardEvent::LinkSucceeded {
                            public_token,
                            metadata,
                        },
                        None => WizardEvent::LinkExited,
                    },
                    None => WizardEvent::LinkExited,
                },
            },
            WizardState::Manual { .. } => match self.host.choose_manual().await? {
                ManualChoice::Back => WizardEvent::Back,
                ManualChoice::Continue => WizardEvent::Continue,
            },
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{user, FakeBackend, PollReply};
    use crate::auth::LoginPayload;
    use crate::notification::NotificationType;
    use crate::store::{Action, AppState};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct ScriptedHost {
        intro: Mutex<VecDeque<IntroChoice>>,
        manual: Mutex<VecDeque<ManualChoice>>,
        link_result: Mutex<Option<(String, InstitutionMetadata)>>,
        opened_with: Mutex<Vec<String>>,
        rendered: Mutex<Vec<&'static str>>,
    }

    impl ScriptedHost {
        fn intro(choices: &[IntroChoice]) -> Self {
            let host = Self::default();
            host.intro.lock().extend(choices.iter().copied());
            host
        }
    }

    #[async_trait]
    impl SetupHost for ScriptedHost {
        fn render(&self, state: &WizardState) {
            self.rendered.lock().push(state.name());
        }

        async fn choose_intro(&self, _link: &LinkTokenStatus) -> SpendlinkResult<IntroChoice> {
            Ok(self.intro.lock().pop_front().unwrap_or(IntroChoice::Cancel))
        }

        async fn choose_manual(&self) -> SpendlinkResult<ManualChoice> {
            Ok(self
                .manual
                .lock()
                .pop_front()
                .unwrap_or(ManualChoice::Continue))
        }

        async fn open_link(
            &self,
            link_token: &str,
        ) -> SpendlinkResult<Option<(String, InstitutionMetadata)>> {
            self.opened_with.lock().push(link_token.to_string());
            Ok(self.link_result.lock().clone())
        }
    }

    fn linked() -> Option<(String, InstitutionMetadata)> {
        Some((
            "public-sandbox".into(),
            InstitutionMetadata {
                institution_id: "ins_1".into(),
                institution_name: "First Platypus Bank".into(),
                account_ids: vec!["acct-1".into()],
            },
        ))
    }

    async fn logged_in_store() -> StoreHandle {
        let store = StoreHandle::spawn(AppState::default(), vec![]);
        store
            .dispatch(Action::BootstrapLogin(LoginPayload::authenticated(
                "tok",
                user(),
                false,
            )))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_linked_setup_polls_then_refreshes() {
        let backend = FakeBackend::happy()
            .with_poll_replies(vec![PollReply::NotReady, PollReply::Ready]);
        let store = logged_in_store().await;
        let host = ScriptedHost::intro(&[IntroChoice::Link]);
        *host.link_result.lock() = linked();

        let report = SetupRunner::new(&backend, &store, &host).run().await.unwrap();

        assert!(report.completed());
        assert_eq!(report.poll(), Some(&PollOutcome::Ready { attempts: 2 }));
        assert_eq!(
            report.session,
            SetupSession {
                link_token: Some("link-sandbox-123".into()),
                link_id: Some(LinkId::new(9)),
                poll_attempts: 2,
            }
        );
        assert_eq!(*host.opened_with.lock(), vec!["link-sandbox-123"]);

        let requests = backend.callback_requests.lock();
        assert_eq!(requests[0].institution_id, "ins_1");
        assert_eq!(requests[0].account_ids, vec!["acct-1".to_string()]);

        let state = store.snapshot();
        assert_eq!(state.links.len(), 1);
        assert_eq!(state.bank_accounts.len(), 1);
        assert!(state.balances.is_some());
    }

    #[tokio::test]
    async fn test_ceiling_still_refreshes() {
        let backend = FakeBackend::happy();
        let store = logged_in_store().await;
        let host = ScriptedHost::intro(&[IntroChoice::Link]);
        *host.link_result.lock() = linked();

        let report = SetupRunner::new(&backend, &store, &host).run().await.unwrap();

        assert!(report.completed());
        assert_eq!(
            report.poll(),
            Some(&PollOutcome::CeilingReached { attempts: 7 })
        );
        assert_eq!(backend.count("wait_for_link_setup"), 7);
        assert_eq!(backend.count("list_bank_accounts"), 1);

        let notifications = report.notifications();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].notification_type, NotificationType::Warning);
        assert!(notifications[0].message.contains("after 7 checks"));
        assert_eq!(notifications[1], Notification::success("Setup complete!"));
    }

    #[tokio::test]
    async fn test_token_failure_never_opens_widget() {
        let backend = FakeBackend::happy();
        *backend.link_token.lock() = None;
        let store = logged_in_store().await;
        let host = ScriptedHost::intro(&[IntroChoice::Link, IntroChoice::Cancel]);

        let report = SetupRunner::new(&backend, &store, &host).run().await.unwrap();

        assert_eq!(report.state, WizardState::Cancelled);
        assert!(report.session.link_token.is_none());
        assert!(host.opened_with.lock().is_empty());
        assert_eq!(backend.count("link_token_callback"), 0);
    }

    #[tokio::test]
    async fn test_cancel_logs_out() {
        let backend = FakeBackend::happy();
        let store = logged_in_store().await;
        let host = ScriptedHost::intro(&[IntroChoice::Cancel]);

        let report = SetupRunner::new(&backend, &store, &host).run().await.unwrap();

        assert!(!report.completed());
        assert!(!store.snapshot().is_authenticated());
        assert_eq!(backend.count("logout"), 1);
        assert_eq!(
            report.notifications(),
            vec![Notification::info("Setup cancelled. You have been logged out.")]
        );
    }

    #[tokio::test]
    async fn test_manual_path_makes_no_requests() {
        let backend = FakeBackend::happy();
        let store = logged_in_store().await;
        let host = ScriptedHost::intro(&[IntroChoice::Manual, IntroChoice::Manual]);
        host.manual.lock().push_back(ManualChoice::Back);

        let report = SetupRunner::new(&backend, &store, &host).run().await.unwrap();

        assert_eq!(report.state, WizardState::ManualComplete);
        assert!(report.completed());
        assert_eq!(backend.calls(), vec!["new_link_token"]);
        assert_eq!(
            *host.rendered.lock(),
            vec!["intro", "intro", "manual", "intro", "manual", "manual_complete"]
        );
    }

    #[tokio::test]
    async fn test_exchange_failure_reported() {
        let backend = FakeBackend::happy();
        *backend.callback_error.lock() = Some((400, "invalid public token".into()));
        let store = logged_in_store().await;
        let host = ScriptedHost::intro(&[IntroChoice::Link]);
        *host.link_result.lock() = linked();

        let report = SetupRunner::new(&backend, &store, &host).run().await.unwrap();

        assert_eq!(
            report.state,
            WizardState::Failed {
                message: "invalid public token".into()
            }
        );
        assert_eq!(backend.count("wait_for_link_setup"), 0);
        let notifications = report.notifications();
        assert!(notifications[0].is_error());
        assert_eq!(notifications[0].message, "Setup failed: invalid public token");
    }
}
