//! Record source port.

use async_trait::async_trait;
use ferry_core::Record;

use crate::error::TransportError;

/// A live, pull-driven cursor over one execution of an upstream query.
///
/// Cursors are forward-only and single-pass: [`next_record`] yields records
/// in source order until `Ok(None)`, and a cursor is never restartable
/// mid-sequence. An `Err` terminates the sequence; callers must not pull
/// again after one. Implementations must not buffer the full result set.
///
/// Cursor teardown is `Drop`; there is no explicit close on this port.
///
/// [`next_record`]: RecordCursor::next_record
#[async_trait]
pub trait RecordCursor: Send {
    /// Pull the next record, `Ok(None)` at end of stream.
    async fn next_record(&mut self) -> Result<Option<Record>, TransportError>;
}

/// Produces the record stream of a transport action.
///
/// [`create`] executes the upstream query and returns a fresh cursor;
/// invoking it again re-executes the query from the top. That per-call
/// restartability is the only replay the contract offers — the cursor itself
/// is single-pass (see [`RecordCursor`]).
///
/// [`create`]: RecordSource::create
#[async_trait]
pub trait RecordSource: Send {
    /// Execute the upstream query and return its cursor.
    async fn create(&mut self) -> Result<Box<dyn RecordCursor>, TransportError>;
}
