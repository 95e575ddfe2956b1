//! Store task and its handle
//!
//! One task owns the state. Actions arrive over an mpsc channel and are
//! applied strictly in order; every new snapshot is published on a `watch`
//! channel before diagnostics sinks hear about it and before the
//! dispatcher's reply is sent.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use super::{reducer, Action, AppState};
use crate::auth::{diagnostics_event, DiagnosticsSink};
use crate::error::{SpendlinkError, SpendlinkResult};

struct Dispatch {
    action: Action,
    reply: oneshot::Sender<Arc<AppState>>,
}

/// Cloneable handle to the store task
#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::UnboundedSender<Dispatch>,
    snapshots: watch::Receiver<Arc<AppState>>,
}

impl StoreHandle {
    /// Spawn the store task on the current tokio runtime
    ///
    /// The task stops once every handle has been dropped.
    pub fn spawn(initial: AppState, sinks: Vec<Arc<dyn DiagnosticsSink>>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Dispatch>();
        let (publisher, snapshots) = watch::channel(Arc::new(initial));

        tokio::spawn(async move {
            while let Some(Dispatch { action, reply }) = receiver.recv().await {
                let prior = publisher.borrow().clone();
                let next = reducer::reduce(&prior, &action);
                publisher.send_replace(Arc::clone(&next));

                if let Some(event) = diagnostics_event(&action) {
                    for sink in &sinks {
                        sink.record(&event);
                    }
                }

                tracing::trace!(action = action.name(), "action applied");
                // The dispatcher may have stopped waiting; the state is applied either way.
                let _ = reply.send(next);
            }
            tracing::trace!("store task stopped");
        });

        Self { sender, snapshots }
    }

    /// Apply an action and wait for the resulting snapshot
    pub async fn dispatch(&self, action: Action) -> SpendlinkResult<Arc<AppState>> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Dispatch { action, reply })
            .map_err(|_| SpendlinkError::Store("store has shut down".into()))?;

        response
            .await
            .map_err(|_| SpendlinkError::Store("store dropped the action".into()))
    }

    /// The latest published snapshot
    pub fn snapshot(&self) -> Arc<AppState> {
        self.snapshots.borrow().clone()
    }

    /// Receiver that observes every new snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.snapshots.clone()
    }
}
