//! Link setup long poll
//!
//! The server holds each status request open until the link's initial
//! data is ready or its own timeout fires (408). The loop asks again on a
//! timeout, stops at the first answer that is not a timeout, and never
//! makes more than [`MAX_POLL_ATTEMPTS`] requests.

use std::time::Duration;

use crate::api::{Backend, SetupStatus};
use crate::models::LinkId;

/// Hard ceiling on status requests per link
pub const MAX_POLL_ATTEMPTS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Capped at [`MAX_POLL_ATTEMPTS`]
    pub max_attempts: u32,
    /// Pause between a timeout and the next attempt
    pub retry_delay: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_POLL_ATTEMPTS,
            retry_delay: Duration::ZERO,
        }
    }
}

impl PollPolicy {
    fn attempt_limit(&self) -> u32 {
        self.max_attempts.clamp(1, MAX_POLL_ATTEMPTS)
    }
}

/// How the poll ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready { attempts: u32 },
    /// Every attempt timed out
    CeilingReached { attempts: u32 },
    /// A request failed with something other than a timeout
    Failed { attempts: u32, error: String },
}

impl PollOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Ready { attempts }
            | Self::CeilingReached { attempts }
            | Self::Failed { attempts, .. } => *attempts,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Poll until the link is set up, an error occurs, or the ceiling is hit
pub async fn wait_for_setup(
    backend: &dyn Backend,
    link_id: LinkId,
    policy: &PollPolicy,
) -> PollOutcome {
    let limit = policy.attempt_limit();

    for attempt in 1..=limit {
        match backend.wait_for_link_setup(link_id).await {
            Ok(SetupStatus::Ready) => {
                tracing::debug!(%link_id, attempt, "link setup ready");
                return PollOutcome::Ready { attempts: attempt };
            }
            Ok(SetupStatus::NotReady) => {
                tracing::debug!(%link_id, attempt, limit, "link setup not ready");
                if attempt < limit && !policy.retry_delay.is_zero() {
                    tokio::time::sleep(policy.retry_delay).await;
                }
            }
            Err(e) => {
                tracing::warn!(%link_id, attempt, error = %e, "link setup poll failed");
                return PollOutcome::Failed {
                    attempts: attempt,
                    error: e.to_string(),
                };
            }
        }
    }

    tracing::warn!(
        %link_id,
        attempts = limit,
        "link setup still not ready after the last attempt; continuing"
    );
    PollOutcome::CeilingReached { attempts: limit }
}
