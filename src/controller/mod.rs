//! Request-bound form controller
//!
//! Each remote action a widget exposes owns one [`ActionSlot`]: its loading
//! flag, last result, last error and copy feedback. The slot is a small state
//! machine:
//!
//! ```text
//!            begin (non-empty, not loading)
//!   Idle ─────────────────────────────────► Submitting
//!    ▲                                       │      │
//!    │ begin                          ok     │      │ err
//!    │                                       ▼      ▼
//!    └──────────────────────────── Succeeded    Failed
//! ```
//!
//! A submission is issued as a [`Ticket`] tagged with the slot's generation.
//! Outcomes carrying an older generation are discarded as stale, so a late
//! response can never overwrite the state of a newer submission.

pub mod copy;

pub use copy::{copy_result, CopyState};

use crate::remote::{RemoteAction, ServiceClient};
use std::fmt;
use tokio::sync::mpsc;

// ─────────────────────────────────────────────────────────────────────────────
// Slot state
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle of one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Why a submission was refused before reaching the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Trimmed input was empty
    Validation(String),
    /// A request for this action is already in flight
    Busy,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => f.write_str(msg),
            Self::Busy => f.write_str("request already in progress"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Permission to send one request, bound to a slot generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    /// Trimmed input to send
    pub text: String,
}

/// Per-action state owned by a widget
#[derive(Debug, Default)]
pub struct ActionSlot {
    state: ActionState,
    result: Option<String>,
    error: Option<String>,
    generation: u64,
    /// Copy-to-clipboard feedback for this slot's result
    pub copy: CopyState,
}

impl ActionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ActionState::Submitting
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the trigger for this action should be enabled
    pub fn can_submit(&self, input: &str) -> bool {
        !self.is_loading() && !input.trim().is_empty()
    }

    /// Start a submission
    ///
    /// Empty input fails locally with `please enter text to <verb>` and never
    /// produces a ticket. A slot already submitting refuses with `Busy` and
    /// keeps its state untouched.
    pub fn begin(&mut self, verb: &str, input: &str) -> Result<Ticket, SubmitError> {
        if self.is_loading() {
            return Err(SubmitError::Busy);
        }

        let text = input.trim();
        if text.is_empty() {
            let msg = format!("please enter text to {}", verb);
            self.state = ActionState::Failed;
            self.result = None;
            self.error = Some(msg.clone());
            self.copy = CopyState::default();
            return Err(SubmitError::Validation(msg));
        }

        self.generation += 1;
        self.state = ActionState::Submitting;
        self.result = None;
        self.error = None;
        // Copy feedback belongs to the result being replaced
        self.copy = CopyState::default();

        Ok(Ticket {
            generation: self.generation,
            text: text.to_string(),
        })
    }

    /// Apply the outcome of a ticket
    ///
    /// Returns false (and changes nothing) when the ticket is stale.
    pub fn finish(&mut self, generation: u64, outcome: Result<String, String>) -> bool {
        if generation != self.generation || !self.is_loading() {
            tracing::debug!(
                "Discarding stale outcome (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }

        match outcome {
            Ok(value) => {
                self.state = ActionState::Succeeded;
                self.result = Some(value);
                self.error = None;
            }
            Err(message) => {
                self.state = ActionState::Failed;
                self.result = None;
                self.error = Some(message);
            }
        }
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies which widget slot an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Totp,
    Hash,
    Encode,
    Decode,
}

/// Result of one in-flight request, posted back to the UI loop
#[derive(Debug)]
pub struct Outcome {
    pub slot: SlotId,
    pub generation: u64,
    /// Result value or user-visible error message
    pub result: Result<String, String>,
}

/// Perform one call and convert any failure into its user-visible message
pub async fn execute<A: RemoteAction>(client: &ServiceClient, action: &A, text: &str) -> Result<String, String> {
    client.call(action, text).await.map_err(|e| {
        tracing::warn!("{} failed: {}", action.verb(), e);
        e.user_message(action.fallback_error())
    })
}

/// Spawns service calls and routes their outcomes to the UI loop
#[derive(Clone)]
pub struct Dispatcher {
    client: ServiceClient,
    tx: mpsc::UnboundedSender<Outcome>,
}

impl Dispatcher {
    pub fn new(client: ServiceClient, tx: mpsc::UnboundedSender<Outcome>) -> Self {
        Self { client, tx }
    }

    /// Validate, mark the slot as submitting and spawn the request
    ///
    /// Returns true when a request was actually sent. The UI thread never
    /// waits; the outcome arrives later on the channel.
    pub fn submit<A: RemoteAction>(&self, id: SlotId, slot: &mut ActionSlot, action: A, input: &str) -> bool {
        let ticket = match slot.begin(action.verb(), input) {
            Ok(ticket) => ticket,
            Err(SubmitError::Busy) => return false,
            Err(SubmitError::Validation(msg)) => {
                tracing::debug!("{:?}: {}", id, msg);
                return false;
            }
        };

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = execute(&client, &action, &ticket.text).await;
            // Receiver gone means the UI shut down; nothing left to update
            let _ = tx.send(Outcome {
                slot: id,
                generation: ticket.generation,
                result,
            });
        });
        true
    }
}

/// Run one submission to completion on `slot` (headless CLI path)
pub async fn run_once<A: RemoteAction>(client: &ServiceClient, slot: &mut ActionSlot, action: &A, input: &str) {
    let Ok(ticket) = slot.begin(action.verb(), input) else {
        return;
    };
    let result = execute(client, action, &ticket.text).await;
    slot.finish(ticket.generation, result);
}
