//! Command trait and the shared handle transports pass around.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

use ferry_core::Schema;
use ferry_transport::RecordCursor;

use crate::error::DataError;
use crate::param::Parameter;

/// A prepared statement with named, column-associated parameters.
///
/// Commands stay bound to the connection that created them. Parameter
/// registration happens once during setup; values are then overwritten
/// per record and the command re-executed.
#[async_trait]
pub trait DbCommand: Send + fmt::Debug {
    /// The command text as given to [`DbConnection::command`].
    ///
    /// [`DbConnection::command`]: crate::DbConnection::command
    fn text(&self) -> &str;

    /// Registered parameters in insertion order.
    fn params(&self) -> &[Parameter];

    /// Looks up a registered parameter by name.
    fn param(&self, name: &str) -> Option<&Parameter> {
        self.params().iter().find(|p| p.name() == name)
    }

    /// Registers a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::DuplicateParameter`] when the name is taken.
    fn add_param(&mut self, param: Parameter) -> Result<(), DataError>;

    /// Sets the value of the parameter addressed by `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownParameter`] when no parameter has that
    /// name.
    fn set_param(&mut self, name: &str, value: Value) -> Result<(), DataError>;

    /// Sets the value of the parameter at `index`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::IndexOutOfRange`] when the index is past the
    /// end of the parameter list.
    fn set_param_at(&mut self, index: usize, value: Value) -> Result<(), DataError>;

    /// Describes the result shape without materialising any rows.
    ///
    /// # Errors
    ///
    /// Returns a driver error when the command text cannot be resolved
    /// against the store.
    async fn schema(&mut self) -> Result<Schema, DataError>;

    /// Executes the command and returns a cursor over its result rows.
    ///
    /// # Errors
    ///
    /// Returns a driver error when execution fails.
    async fn query(&mut self) -> Result<Box<dyn RecordCursor>, DataError>;

    /// Executes the command for effect and returns the affected row count.
    ///
    /// # Errors
    ///
    /// Returns a driver error when execution fails.
    async fn execute(&mut self) -> Result<u64, DataError>;
}

/// A command shared between pipeline stages.
///
/// The binding handler and the sink both hold the destination command;
/// the async mutex serialises value writes against executions.
pub type SharedCommand = Arc<Mutex<Box<dyn DbCommand>>>;

/// Wraps a command for shared use.
#[must_use]
pub fn share(command: Box<dyn DbCommand>) -> SharedCommand {
    Arc::new(Mutex::new(command))
}
