//! First-time setup wizard
//!
//! Links a bank account after the first login: fetch a link token, let the
//! user pick an institution in the link widget, exchange the public token,
//! wait for the initial import, then refresh everything.

pub mod poll;
pub mod runner;
pub mod wizard;

pub use poll::{wait_for_setup, PollOutcome, PollPolicy, MAX_POLL_ATTEMPTS};
pub use runner::{IntroChoice, ManualChoice, SetupHost, SetupReport, SetupRunner, SetupSession};
pub use wizard::{
    start, transition, Effect, LinkTokenStatus, WizardEvent, WizardState,
    LINK_UNAVAILABLE_MESSAGE,
};
