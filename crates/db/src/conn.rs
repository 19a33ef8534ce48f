//! Connection trait and lifecycle helpers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::command::DbCommand;
use crate::error::DataError;

/// Lifecycle state of a [`DbConnection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnState {
    /// The connection is usable.
    Open,
    /// The connection was closed in an orderly fashion.
    Closed,
    /// The connection failed and cannot be reused.
    Broken,
}

impl ConnState {
    /// Returns `true` while commands may be created.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ConnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Broken => "broken",
        };
        f.write_str(name)
    }
}

/// An open session against a concrete store.
///
/// Connections are created by a [`DataProvider`](crate::DataProvider) and
/// hand out [`DbCommand`] values scoped to themselves. Dropping a
/// connection without closing it is allowed; drivers release their
/// resources on drop.
#[async_trait]
pub trait DbConnection: Send {
    /// Current lifecycle state.
    fn state(&self) -> ConnState;

    /// Creates a command with the given text, scoped to this connection.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Closed`] when the connection is no longer
    /// open, or a driver error when the text cannot be prepared.
    async fn command(&self, text: &str) -> Result<Box<dyn DbCommand>, DataError>;

    /// Closes the connection.
    ///
    /// # Errors
    ///
    /// Returns a driver error when orderly shutdown fails. The connection
    /// is unusable afterwards either way.
    async fn close(&mut self) -> Result<(), DataError>;
}

/// Closes a connection without surfacing errors.
///
/// `None` and already-closed connections are no-ops; close failures are
/// logged at debug level and swallowed. Meant for teardown paths where a
/// close error must not mask the error that got us there.
pub async fn close_quietly(conn: Option<&mut dyn DbConnection>) {
    let Some(conn) = conn else { return };
    if conn.state() == ConnState::Closed {
        return;
    }
    if let Err(err) = conn.close().await {
        tracing::debug!(error = %err, "ignoring connection close failure");
    }
}
