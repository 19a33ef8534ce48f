//! Record handler port.

use async_trait::async_trait;
use ferry_core::Record;

use crate::error::TransportError;

/// One link of an action's handler chain.
///
/// A handler has two phases. [`setup`] runs once per execution, before any
/// record is pulled; the orchestrator attempts it on every handler in chain
/// order and refuses to stream unless all succeed. [`handle`] then runs
/// exactly once per record, in chain order, each handler's output feeding
/// the next's input — no record is skipped or reordered.
///
/// `handle` may return the record it received or substitute another; its
/// side effects are limited to collaborating state prepared during `setup`
/// (destination parameters, say).
///
/// [`setup`]: TransportHandler::setup
/// [`handle`]: TransportHandler::handle
#[async_trait]
pub trait TransportHandler: Send {
    /// Stable short name, used in error detail and log fields.
    fn name(&self) -> &str;

    /// One-time preparation before streaming. Defaults to a no-op.
    async fn setup(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Transform one record.
    async fn handle(&mut self, record: Record) -> Result<Record, TransportError>;
}
