//! Record source backed by a database command.

use async_trait::async_trait;

use ferry_transport::{RecordCursor, RecordSource, TransportError};

use crate::command::SharedCommand;

/// Adapts a query command into a [`RecordSource`].
///
/// Each [`create`](RecordSource::create) call re-executes the command, so
/// a rebuilt action observes the store as it is then, not as it was.
pub struct DbRecordSource {
    command: SharedCommand,
}

impl DbRecordSource {
    /// Wraps the command whose result rows feed the transport.
    #[must_use]
    pub fn new(command: SharedCommand) -> Self {
        Self { command }
    }
}

#[async_trait]
impl RecordSource for DbRecordSource {
    async fn create(&mut self) -> Result<Box<dyn RecordCursor>, TransportError> {
        let mut command = self.command.lock().await;
        tracing::debug!(text = command.text(), "opening source cursor");
        command.query().await.map_err(TransportError::source)
    }
}
