//! Authentication state
//!
//! The authentication slice of the store, the pure reducer that moves it
//! between states, and the diagnostics observer that mirrors the current
//! user into error reports.

pub mod diagnostics;
pub mod reducer;
pub mod state;

pub use diagnostics::{
    diagnostics_event, DiagnosticsEvent, DiagnosticsSink, DiagnosticsUser, TracingDiagnostics,
};
pub use reducer::reduce;
pub use state::{AuthenticationState, LoginPayload};
