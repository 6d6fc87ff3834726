//! Message enum for Elm Architecture (TEA) pattern.
//!
//! Keyboard input and the issue fetch result are both expressed as messages
//! and delivered through one channel, so the session sees a strict total order.

use crate::data::Issue;

/// Result of the one-shot "fetch my issues" task.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Vec<Issue>),
    /// The fetch failed; carries a human-readable reason.
    Failed(String),
}

impl From<anyhow::Result<Vec<Issue>>> for FetchOutcome {
    fn from(result: anyhow::Result<Vec<Issue>>) -> Self {
        match result {
            Ok(issues) => FetchOutcome::Loaded(issues),
            Err(e) => FetchOutcome::Failed(format!("{:#}", e)),
        }
    }
}

/// Everything that can drive a session transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The issue fetch completed (successfully or not)
    IssuesFetched(FetchOutcome),
    /// Move the cursor up by one
    MoveUp,
    /// Move the cursor down by one
    MoveDown,
    /// Select or deselect the issue under the cursor
    Toggle,
    /// Quit the application
    Quit,
    /// No operation (unhandled keys, resize)
    None,
}

impl Message {
    /// Successful fetch of `issues`.
    pub fn fetched(issues: Vec<Issue>) -> Self {
        Message::IssuesFetched(FetchOutcome::Loaded(issues))
    }
}

/// Side effects the session asks the event loop to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the issue fetch once and report back with `Message::IssuesFetched`
    FetchIssues,
}
