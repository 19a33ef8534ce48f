//! Lifecycle status and outcome snapshots.
//!
//! An action reports where it is through [`ActionStatus`] and what it
//! produced through [`ActionResult`]. Both are immutable pairs of the
//! action's id and a code; a fresh snapshot is created on every transition
//! and superseded, never mutated.

use ferry_core::ActionId;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a transport action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    /// Constructed, worker not yet observed running.
    NotStarted,
    /// The record stream is being pumped.
    Processing,
    /// Finished, by success or by failure; the result code distinguishes.
    Done,
    /// Finished by cooperative cancellation.
    Cancelled,
}

impl StatusCode {
    /// Returns `true` if the action has reached a final state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Returns `true` if the action is currently doing work.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Processing)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Processing => write!(f, "processing"),
            Self::Done => write!(f, "done"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Terminal outcome classification of a transport action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCode {
    /// Pre-execution placeholder; no outcome yet.
    None,
    /// The stream completed and every record was written.
    Success,
    /// The stream terminated on a source, handler, or sink error.
    Failure,
    /// The stream was cut short by cancellation; not a failure.
    Cancelled,
}

impl ResultCode {
    /// Returns `true` once a terminal outcome has been set.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` if the action completed successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns `true` if the action ended in failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Immutable status snapshot: which action, at which lifecycle stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStatus {
    action: ActionId,
    code: StatusCode,
}

impl ActionStatus {
    /// Create a snapshot.
    #[must_use]
    pub fn new(action: ActionId, code: StatusCode) -> Self {
        Self { action, code }
    }

    /// The action this snapshot describes.
    #[must_use]
    pub fn action(&self) -> &ActionId {
        &self.action
    }

    /// The lifecycle stage at snapshot time.
    #[must_use]
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// Returns `true` if this snapshot is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.code.is_terminal()
    }
}

/// Immutable result snapshot: which action, with which outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    action: ActionId,
    code: ResultCode,
}

impl ActionResult {
    /// Create a snapshot.
    #[must_use]
    pub fn new(action: ActionId, code: ResultCode) -> Self {
        Self { action, code }
    }

    /// The action this snapshot describes.
    #[must_use]
    pub fn action(&self) -> &ActionId {
        &self.action
    }

    /// The outcome code at snapshot time.
    #[must_use]
    pub fn code(&self) -> ResultCode {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> ActionId {
        "move-1".parse().unwrap()
    }

    #[test]
    fn terminal_status_codes() {
        assert!(StatusCode::Done.is_terminal());
        assert!(StatusCode::Cancelled.is_terminal());

        assert!(!StatusCode::NotStarted.is_terminal());
        assert!(!StatusCode::Processing.is_terminal());
    }

    #[test]
    fn active_status_codes() {
        assert!(StatusCode::Processing.is_active());
        assert!(!StatusCode::NotStarted.is_active());
        assert!(!StatusCode::Done.is_active());
        assert!(!StatusCode::Cancelled.is_active());
    }

    #[test]
    fn result_code_predicates() {
        assert!(!ResultCode::None.is_terminal());
        assert!(ResultCode::Success.is_terminal());
        assert!(ResultCode::Failure.is_terminal());
        assert!(ResultCode::Cancelled.is_terminal());

        assert!(ResultCode::Success.is_success());
        assert!(!ResultCode::Cancelled.is_success());

        assert!(ResultCode::Failure.is_failure());
        assert!(!ResultCode::Cancelled.is_failure());
    }

    #[test]
    fn display_formatting() {
        assert_eq!(StatusCode::NotStarted.to_string(), "not_started");
        assert_eq!(StatusCode::Processing.to_string(), "processing");
        assert_eq!(StatusCode::Done.to_string(), "done");
        assert_eq!(StatusCode::Cancelled.to_string(), "cancelled");

        assert_eq!(ResultCode::None.to_string(), "none");
        assert_eq!(ResultCode::Success.to_string(), "success");
        assert_eq!(ResultCode::Failure.to_string(), "failure");
        assert_eq!(ResultCode::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn serde_rename_snake_case() {
        let json = serde_json::to_string(&StatusCode::NotStarted).unwrap();
        assert_eq!(json, "\"not_started\"");

        let json = serde_json::to_string(&ResultCode::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn serde_roundtrip() {
        for code in [
            StatusCode::NotStarted,
            StatusCode::Processing,
            StatusCode::Done,
            StatusCode::Cancelled,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            let back: StatusCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, back, "roundtrip failed for {code}");
        }
    }

    #[test]
    fn snapshots_carry_action_and_code() {
        let status = ActionStatus::new(id(), StatusCode::Done);
        assert_eq!(status.action(), &id());
        assert_eq!(status.code(), StatusCode::Done);
        assert!(status.is_terminal());

        let result = ActionResult::new(id(), ResultCode::Success);
        assert_eq!(result.action(), &id());
        assert_eq!(result.code(), ResultCode::Success);
    }

    #[test]
    fn snapshot_serde_roundtrip() {
        let status = ActionStatus::new(id(), StatusCode::Cancelled);
        let json = serde_json::to_string(&status).unwrap();
        let back: ActionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
