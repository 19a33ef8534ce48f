//! Error type shared by the database traits and their drivers.

use thiserror::Error;

/// Errors produced by connections, commands, and parameter handling.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataError {
    /// A column name was not found in the schema under inspection.
    #[error("unknown column '{column}'")]
    UnknownColumn {
        /// The column that was requested.
        column: String,
    },

    /// A parameter name was not found on the command.
    #[error("unknown parameter '{name}'")]
    UnknownParameter {
        /// The parameter that was requested.
        name: String,
    },

    /// A parameter with the same name is already registered on the command.
    #[error("duplicate parameter '{name}'")]
    DuplicateParameter {
        /// The parameter that was added twice.
        name: String,
    },

    /// A positional parameter index is past the end of the parameter list.
    #[error("parameter index {index} out of range (command has {len})")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of parameters on the command.
        len: usize,
    },

    /// Opening or using the underlying connection failed.
    #[error("connection failed: {detail}")]
    Connection {
        /// Driver-reported detail.
        detail: String,
    },

    /// Executing a command against the store failed.
    #[error("query failed: {detail}")]
    Query {
        /// Driver-reported detail.
        detail: String,
    },

    /// The connection was used after it was closed.
    #[error("connection is closed")]
    Closed,
}

impl DataError {
    /// Unknown column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    /// Unknown parameter error.
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::UnknownParameter { name: name.into() }
    }

    /// Duplicate parameter error.
    pub fn duplicate_parameter(name: impl Into<String>) -> Self {
        Self::DuplicateParameter { name: name.into() }
    }

    /// Connection-level failure.
    pub fn connection(detail: impl Into<String>) -> Self {
        Self::Connection {
            detail: detail.into(),
        }
    }

    /// Query-level failure.
    pub fn query(detail: impl Into<String>) -> Self {
        Self::Query {
            detail: detail.into(),
        }
    }

    /// Returns `true` for errors caused by a name lookup miss.
    #[must_use]
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            Self::UnknownColumn { .. } | Self::UnknownParameter { .. }
        )
    }
}
