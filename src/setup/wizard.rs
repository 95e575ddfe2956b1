//! Setup wizard state machine
//!
//! The wizard is a pure function from `(state, event)` to the next state and
//! the effects the host must carry out. Nothing in here talks to the
//! network; [`super::runner::SetupRunner`] executes the effects and feeds
//! their results back in as events.

use crate::api::{InstitutionMetadata, LinkCallbackRequest};
use crate::models::LinkId;

use super::poll::PollOutcome;

/// Text shown in place of the link widget when no token could be fetched
pub const LINK_UNAVAILABLE_MESSAGE: &str = "Something went wrong...";

/// Progress of the link token request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTokenStatus {
    Loading,
    Ready(String),
    Failed,
}

impl LinkTokenStatus {
    /// Token to open the link widget with, once one is available
    pub fn widget_token(&self) -> Option<&str> {
        match self {
            Self::Ready(token) => Some(token),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    /// Choose between linking a bank, a manual account, or leaving
    Intro { link: LinkTokenStatus },
    /// Placeholder step for manual accounts
    Manual { link: LinkTokenStatus },
    /// Public token handed to the server, waiting for a link id
    Exchanging,
    Polling { link_id: LinkId },
    Refreshing { link_id: LinkId, poll: PollOutcome },
    Complete { link_id: LinkId, poll: PollOutcome },
    /// Continued from the manual step; no account was created
    ManualComplete,
    /// Left the wizard from the intro, which logs out
    Cancelled,
    Failed { message: String },
}

impl WizardState {
    /// No further events are accepted
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete { .. } | Self::ManualComplete | Self::Cancelled | Self::Failed { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Intro { .. } => "intro",
            Self::Manual { .. } => "manual",
            Self::Exchanging => "exchanging",
            Self::Polling { .. } => "polling",
            Self::Refreshing { .. } => "refreshing",
            Self::Complete { .. } => "complete",
            Self::ManualComplete => "manual_complete",
            Self::Cancelled => "cancelled",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    LinkTokenLoaded(String),
    LinkTokenFailed(String),
    ChooseManual,
    Back,
    Continue,
    Cancel,
    /// The link widget reported success
    LinkSucceeded {
        public_token: String,
        metadata: InstitutionMetadata,
    },
    /// The link widget was closed without linking anything
    LinkExited,
    TokenExchanged(LinkId),
    ExchangeFailed(String),
    PollFinished(PollOutcome),
    CollectionsRefreshed,
    RefreshFailed(String),
}

/// Work the host performs on the wizard's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchLinkToken,
    ExchangeToken(LinkCallbackRequest),
    PollSetup(LinkId),
    RefreshCollections,
    Logout,
}

/// Initial state: fetch a link token while showing the intro
pub fn start() -> (WizardState, Vec<Effect>) {
    (
        WizardState::Intro {
            link: LinkTokenStatus::Loading,
        },
        vec![Effect::FetchLinkToken],
    )
}

/// Advance the wizard
///
/// Events that make no sense in the current state leave it unchanged and
/// produce no effects.
pub fn transition(state: WizardState, event: WizardEvent) -> (WizardState, Vec<Effect>) {
    use WizardEvent as E;
    use WizardState as S;

    match (state, event) {
        (S::Intro { .. }, E::LinkTokenLoaded(token)) => (
            S::Intro {
                link: LinkTokenStatus::Ready(token),
            },
            vec![],
        ),
        (S::Manual { .. }, E::LinkTokenLoaded(token)) => (
            S::Manual {
                link: LinkTokenStatus::Ready(token),
            },
            vec![],
        ),
        (S::Intro { .. }, E::LinkTokenFailed(reason)) => {
            tracing::warn!(%reason, "link token unavailable");
            (
                S::Intro {
                    link: LinkTokenStatus::Failed,
                },
                vec![],
            )
        }
        (S::Manual { .. }, E::LinkTokenFailed(reason)) => {
            tracing::warn!(%reason, "link token unavailable");
            (
                S::Manual {
                    link: LinkTokenStatus::Failed,
                },
                vec![],
            )
        }

        (S::Intro { link }, E::ChooseManual) => (S::Manual { link }, vec![]),
        (S::Manual { link }, E::Back) => (S::Intro { link }, vec![]),
        (S::Manual { .. }, E::Continue) => (S::ManualComplete, vec![]),
        (S::Intro { .. }, E::Cancel) => (S::Cancelled, vec![Effect::Logout]),

        (
            S::Intro {
                link: LinkTokenStatus::Ready(_),
            },
            E::LinkSucceeded {
                public_token,
                metadata,
            },
        ) => {
            tracing::debug!(
                institution_id = %metadata.institution_id,
                accounts = metadata.account_ids.len(),
                "link widget succeeded"
            );
            let request = LinkCallbackRequest::new(public_token, &metadata);
            (S::Exchanging, vec![Effect::ExchangeToken(request)])
        }
        (state @ S::Intro { .. }, E::LinkExited) => (state, vec![]),

        (S::Exchanging, E::TokenExchanged(link_id)) => (
            S::Polling { link_id },
            vec![Effect::PollSetup(link_id)],
        ),
        (S::Exchanging, E::ExchangeFailed(message)) => (S::Failed { message }, vec![]),

        (S::Polling { link_id }, E::PollFinished(poll)) => (
            S::Refreshing { link_id, poll },
            vec![Effect::RefreshCollections],
        ),

        (S::Refreshing { link_id, poll }, E::CollectionsRefreshed) => {
            (S::Complete { link_id, poll }, vec![])
        }
        (S::Refreshing { .. }, E::RefreshFailed(message)) => (S::Failed { message }, vec![]),

        (state, event) => {
            tracing::trace!(state = state.name(), ?event, "event ignored");
            (state, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_intro() -> WizardState {
        let (state, _) = start();
        transition(state, WizardEvent::LinkTokenLoaded("link-abc".into())).0
    }

    fn metadata() -> InstitutionMetadata {
        InstitutionMetadata {
            institution_id: "ins_1".into(),
            institution_name: "First Platypus Bank".into(),
            account_ids: vec!["acct-1".into()],
        }
    }

    #[test]
    fn test_start_fetches_link_token() {
        let (state, effects) = start();
        assert_eq!(
            state,
            WizardState::Intro {
                link: LinkTokenStatus::Loading
            }
        );
        assert_eq!(effects, vec![Effect::FetchLinkToken]);
    }

    #[test]
    fn test_token_failure_shows_fallback_without_widget() {
        let (state, _) = start();
        let (state, effects) = transition(state, WizardEvent::LinkTokenFailed("500".into()));

        assert!(effects.is_empty());
        let WizardState::Intro { link } = &state else {
            panic!("expected intro, got {:?}", state);
        };
        assert_eq!(*link, LinkTokenStatus::Failed);
        assert!(link.widget_token().is_none());

        // A widget callback cannot arrive without a widget
        let (state, effects) = transition(
            state,
            WizardEvent::LinkSucceeded {
                public_token: "public".into(),
                metadata: metadata(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.name(), "intro");
    }

    #[test]
    fn test_link_success_exchanges_institution_and_accounts() {
        let (state, effects) = transition(
            ready_intro(),
            WizardEvent::LinkSucceeded {
                public_token: "public-sandbox".into(),
                metadata: metadata(),
            },
        );

        assert_eq!(state, WizardState::Exchanging);
        let [Effect::ExchangeToken(request)] = effects.as_slice() else {
            panic!("expected one exchange effect, got {:?}", effects);
        };
        assert_eq!(request.public_token, "public-sandbox");
        assert_eq!(request.institution_id, "ins_1");
        assert_eq!(request.account_ids, vec!["acct-1".to_string()]);
    }

    #[test]
    fn test_linked_path_to_complete() {
        let (state, _) = transition(
            ready_intro(),
            WizardEvent::LinkSucceeded {
                public_token: "p".into(),
                metadata: metadata(),
            },
        );
        let (state, effects) = transition(state, WizardEvent::TokenExchanged(LinkId::new(9)));
        assert_eq!(effects, vec![Effect::PollSetup(LinkId::new(9))]);

        let poll = PollOutcome::CeilingReached { attempts: 7 };
        let (state, effects) = transition(state, WizardEvent::PollFinished(poll.clone()));
        assert_eq!(effects, vec![Effect::RefreshCollections]);

        let (state, effects) = transition(state, WizardEvent::CollectionsRefreshed);
        assert!(effects.is_empty());
        assert_eq!(
            state,
            WizardState::Complete {
                link_id: LinkId::new(9),
                poll
            }
        );
        assert!(state.is_terminal());
    }

    #[test]
    fn test_manual_back_and_continue() {
        let (state, _) = transition(ready_intro(), WizardEvent::ChooseManual);
        assert_eq!(state.name(), "manual");

        let (state, _) = transition(state, WizardEvent::Back);
        assert_eq!(state, ready_intro());

        let (state, _) = transition(state, WizardEvent::ChooseManual);
        let (state, effects) = transition(state, WizardEvent::Continue);
        assert_eq!(state, WizardState::ManualComplete);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_cancel_logs_out() {
        let (state, effects) = transition(ready_intro(), WizardEvent::Cancel);
        assert_eq!(state, WizardState::Cancelled);
        assert_eq!(effects, vec![Effect::Logout]);
    }

    #[test]
    fn test_exchange_failure_is_terminal() {
        let (state, _) = transition(
            ready_intro(),
            WizardEvent::LinkSucceeded {
                public_token: "p".into(),
                metadata: metadata(),
            },
        );
        let (state, _) = transition(state, WizardEvent::ExchangeFailed("bad token".into()));
        assert_eq!(
            state,
            WizardState::Failed {
                message: "bad token".into()
            }
        );
        assert!(state.is_terminal());
    }

    #[test]
    fn test_unexpected_event_is_ignored() {
        let (state, effects) = transition(WizardState::Exchanging, WizardEvent::Cancel);
        assert_eq!(state, WizardState::Exchanging);
        assert!(effects.is_empty());
    }
}
