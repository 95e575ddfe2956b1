//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod auth;
pub mod expense;
pub mod link;
pub mod setup;

use std::io::{self, Write};

pub use account::{handle_account_command, AccountCommands};
pub use auth::{handle_login, handle_logout, handle_status};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use link::{handle_link_command, LinkCommands};
pub use setup::{handle_setup_command, TerminalHost};

use crate::auth::AuthenticationState;
use crate::config::SpendlinkPaths;
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::notification::Notification;
use crate::storage::Session;

/// Prompt for a string input
///
/// The read happens on the blocking pool so the runtime keeps driving
/// in-flight requests.
pub(crate) async fn prompt_string(prompt: &str) -> SpendlinkResult<String> {
    let prompt = prompt.to_string();
    run_blocking(move || read_line(&prompt)).await
}

/// Run a blocking terminal read off the async runtime
pub(crate) async fn run_blocking<T, F>(read: F) -> SpendlinkResult<T>
where
    F: FnOnce() -> SpendlinkResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(read)
        .await
        .map_err(|e| SpendlinkError::Io(format!("Input task failed: {}", e)))?
}

fn read_line(prompt: &str) -> SpendlinkResult<String> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| SpendlinkError::Io(e.to_string()))?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| SpendlinkError::Io(e.to_string()))?;
    if read == 0 {
        return Err(SpendlinkError::Io("Input closed".into()));
    }

    Ok(input.trim().to_string())
}

/// Print queued notifications, errors to stderr
pub fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        if notification.is_error() {
            eprintln!("{}", notification);
        } else {
            println!("{}", notification);
        }
    }
}

/// Write the session for an authenticated state, remove it otherwise
pub fn persist_session(paths: &SpendlinkPaths, auth: &AuthenticationState) -> SpendlinkResult<()> {
    match Session::from_state(auth) {
        Some(session) => session.save(paths),
        None => Session::clear(paths),
    }
}
