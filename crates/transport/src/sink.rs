//! Record sink port.

use async_trait::async_trait;
use ferry_core::Record;

use crate::error::TransportError;

/// Consumes the record stream of a transport action, one record at a time.
///
/// The orchestrator calls [`write`] once per surviving record, in source
/// order. Write failures propagate to the orchestrator and terminate the
/// stream; a sink never retries on its own. Sinks whose write command was
/// populated by an upstream handler (the parameter-binding scheme) may
/// ignore the record argument entirely.
///
/// [`write`]: RecordSink::write
#[async_trait]
pub trait RecordSink: Send {
    /// Perform one downstream write for `record`.
    async fn write(&mut self, record: &Record) -> Result<(), TransportError>;
}
