//! Mutable lifecycle record of one action execution.

use ferry_core::ActionId;

use crate::error::TransportError;
use crate::status::{ActionResult, ActionStatus, ResultCode, StatusCode};
use crate::transition::validate_transition;

/// The mutable status/result pair behind an executing action.
///
/// One instance exists per execution, shared between the worker and the
/// handle. Snapshot accessors mint fresh immutable [`ActionStatus`] /
/// [`ActionResult`] values; the record itself is never handed out.
#[derive(Debug, Clone)]
pub struct ActionState {
    action: ActionId,
    status: StatusCode,
    result: ResultCode,
}

impl ActionState {
    /// Create the pre-execution state: `NotStarted` status, `None` result.
    #[must_use]
    pub fn new(action: ActionId) -> Self {
        Self {
            action,
            status: StatusCode::NotStarted,
            result: ResultCode::None,
        }
    }

    /// The action this state belongs to.
    #[must_use]
    pub fn action(&self) -> &ActionId {
        &self.action
    }

    /// Current status code.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Current result code.
    #[must_use]
    pub fn result_code(&self) -> ResultCode {
        self.result
    }

    /// Fresh status snapshot for the current state.
    #[must_use]
    pub fn status(&self) -> ActionStatus {
        ActionStatus::new(self.action.clone(), self.status)
    }

    /// Fresh result snapshot for the current state.
    #[must_use]
    pub fn result(&self) -> ActionResult {
        ActionResult::new(self.action.clone(), self.result)
    }

    /// Transition to a new status, validating the edge, and return the fresh
    /// snapshot. The state is unchanged on rejection.
    pub fn transition_to(&mut self, to: StatusCode) -> Result<ActionStatus, TransportError> {
        validate_transition(self.status, to)?;
        self.status = to;
        Ok(self.status())
    }

    /// Set the terminal result code and return the fresh snapshot.
    pub fn set_result(&mut self, code: ResultCode) -> ActionResult {
        self.result = code;
        self.result()
    }
}
