//! Record sink backed by a database command.

use async_trait::async_trait;

use ferry_core::Record;
use ferry_transport::{RecordSink, TransportError};

use crate::command::SharedCommand;

/// Adapts a write command into a [`RecordSink`].
///
/// The record payload itself is not inspected: under the binding scheme
/// the values were already copied onto the command's parameters, so each
/// write is one execution of the destination command.
pub struct DbRecordSink {
    command: SharedCommand,
}

impl DbRecordSink {
    /// Wraps the command executed once per incoming record.
    #[must_use]
    pub fn new(command: SharedCommand) -> Self {
        Self { command }
    }
}

#[async_trait]
impl RecordSink for DbRecordSink {
    async fn write(&mut self, _record: &Record) -> Result<(), TransportError> {
        let mut command = self.command.lock().await;
        let rows = command.execute().await.map_err(TransportError::sink)?;
        tracing::debug!(rows, "destination command executed");
        Ok(())
    }
}
