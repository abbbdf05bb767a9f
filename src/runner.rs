//! Background request runner.
//!
//! Runs exactly one remote call off the interactive loop and delivers
//! exactly one terminal [`Outcome`] through an owned [`RequestHandle`].
//! Replacing or dropping a handle does NOT cancel the spawned call: the
//! task runs to completion and its result is discarded when nobody is
//! listening. Callers must not assume the prior call stops when a new one
//! starts.

use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

use crate::api::TextGenClient;

/// Which form action produced an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Generate a fresh bad-code example.
    Generate,
    /// Grade the learner's annotations.
    Grade,
    /// End-of-round send-off message.
    Closing,
}

/// The single terminal event of a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
}

/// Owned handle to one outstanding request.
pub struct RequestHandle {
    kind: RequestKind,
    rx: oneshot::Receiver<Outcome>,
}

impl RequestHandle {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Non-blocking poll for the terminal event. Returns `None` while the
    /// call is still running. A dropped sender (task abort, runtime
    /// shutdown) is reported as a failure so the handle still yields
    /// exactly one terminal event.
    pub fn try_outcome(&mut self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Outcome::Failure(
                "request task terminated unexpectedly".to_string(),
            )),
        }
    }

    /// Await the terminal event. Test-path convenience; the TUI loop polls.
    pub async fn outcome(self) -> Outcome {
        self.rx.await.unwrap_or_else(|_| {
            Outcome::Failure("request task terminated unexpectedly".to_string())
        })
    }
}

/// Dispatch one prompt through the client on a background task.
///
/// Preconditions (enforced by the orchestrator, not here): the prompt is
/// non-empty and a credential was present to build the client. No timeout,
/// no retry: the call runs until the library reports success or an error.
pub fn dispatch(client: Arc<dyn TextGenClient>, kind: RequestKind, prompt: String) -> RequestHandle {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        debug!(?kind, prompt_chars = prompt.len(), "Dispatching request");
        let outcome = match client.generate(&prompt).await {
            Ok(text) => Outcome::Success(text),
            Err(e) => Outcome::Failure(e.to_string()),
        };
        // Receiver may already be gone if the handle was replaced.
        let _ = tx.send(outcome);
    });

    RequestHandle { kind, rx }
}
