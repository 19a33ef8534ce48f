//! State machine transition validation for action status.
//!
//! Status only moves forward: `NotStarted → Processing → {Done, Cancelled}`,
//! with the direct edges `NotStarted → Done` and `NotStarted → Cancelled`
//! for pipelines that never report an intermediate `Processing` snapshot.
//! Terminal states have no outgoing edges.

use crate::error::TransportError;
use crate::status::StatusCode;

/// Returns `true` if the status transition from `from` to `to` is valid.
#[must_use]
pub fn can_transition(from: StatusCode, to: StatusCode) -> bool {
    matches!(
        (from, to),
        (StatusCode::NotStarted, StatusCode::Processing)
            | (StatusCode::NotStarted, StatusCode::Done)
            | (StatusCode::NotStarted, StatusCode::Cancelled)
            | (StatusCode::Processing, StatusCode::Done)
            | (StatusCode::Processing, StatusCode::Cancelled)
    )
}

/// Validate a status transition, returning an error if invalid.
pub fn validate_transition(from: StatusCode, to: StatusCode) -> Result<(), TransportError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransportError::invalid_transition(from, to))
    }
}
