//! Handler that moves record values onto destination command parameters.

use async_trait::async_trait;
use std::sync::Arc;

use ferry_core::Record;
use ferry_transport::{TransportError, TransportHandler};

use crate::command::SharedCommand;
use crate::error::DataError;
use crate::provider::DataProvider;

/// Binds source columns to destination parameters.
///
/// During setup the handler reads the source command's schema and
/// registers one provider-styled parameter per column on the destination
/// command. Per record it copies each column value onto its parameter and
/// passes the record through unchanged; the sink then executes the
/// destination command with the freshly bound values.
///
/// A column missing from an incoming record is an error, not a null bind.
pub struct BindParametersHandler {
    provider: Arc<dyn DataProvider>,
    source: SharedCommand,
    destination: SharedCommand,
    columns: Vec<String>,
}

impl BindParametersHandler {
    const NAME: &'static str = "bind-params";

    /// Creates a handler binding `source` columns onto `destination`
    /// parameters named per `provider`.
    #[must_use]
    pub fn new(
        provider: Arc<dyn DataProvider>,
        source: SharedCommand,
        destination: SharedCommand,
    ) -> Self {
        Self {
            provider,
            source,
            destination,
            columns: Vec::new(),
        }
    }

    /// Columns discovered during setup, in schema order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

#[async_trait]
impl TransportHandler for BindParametersHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn setup(&mut self) -> Result<(), TransportError> {
        let schema = {
            let mut source = self.source.lock().await;
            source.schema().await
        }
        .map_err(|err| TransportError::setup(err.to_string()))?;

        let mut destination = self.destination.lock().await;
        self.columns.clear();
        for column in schema.columns() {
            destination
                .add_param(self.provider.parameter(column))
                .map_err(|err| TransportError::setup(err.to_string()))?;
            self.columns.push(column.clone());
        }
        tracing::debug!(columns = self.columns.len(), "destination parameters bound");
        Ok(())
    }

    async fn handle(&mut self, record: Record) -> Result<Record, TransportError> {
        let mut destination = self.destination.lock().await;
        for column in &self.columns {
            let value = record.get(column).cloned().ok_or_else(|| {
                TransportError::handler(Self::NAME, DataError::unknown_column(column))
            })?;
            self.provider
                .set_value(&mut **destination, column, value)
                .map_err(|err| TransportError::handler(Self::NAME, err))?;
        }
        Ok(record)
    }
}
