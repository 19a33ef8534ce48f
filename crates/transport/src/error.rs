//! Transport error types.

use thiserror::Error;

use crate::status::StatusCode;

/// Boxed error type carried by the stage variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from setting up or running a transport action.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// One or more handlers failed their one-time setup. Pre-flight
    /// configuration error: streaming never starts.
    #[error("handler setup failed: {detail}")]
    Setup {
        /// Every failed handler, `name: cause` joined with `"; "`.
        detail: String,
    },

    /// The source failed to produce its cursor or a record.
    #[error("source failed: {source}")]
    Source {
        /// The underlying failure.
        #[source]
        source: BoxError,
    },

    /// A handler failed while transforming a record.
    #[error("handler '{handler}' failed: {source}")]
    Handler {
        /// Name of the failing handler.
        handler: String,
        /// The underlying failure.
        #[source]
        source: BoxError,
    },

    /// The sink failed to write a record.
    #[error("sink failed: {source}")]
    Sink {
        /// The underlying failure.
        #[source]
        source: BoxError,
    },

    /// A status transition is not valid for the current state.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Current status code.
        from: StatusCode,
        /// Attempted target status code.
        to: StatusCode,
    },

    /// The action observed its cancellation token between records.
    #[error("transport cancelled")]
    Cancelled,

    /// The worker task died without resolving (panic or runtime shutdown).
    #[error("worker task failed: {detail}")]
    Worker {
        /// Join failure description.
        detail: String,
    },
}

impl TransportError {
    /// Create a setup error from joined per-handler detail.
    pub fn setup(detail: impl Into<String>) -> Self {
        Self::Setup {
            detail: detail.into(),
        }
    }

    /// Wrap an underlying error as a source failure.
    pub fn source(source: impl Into<BoxError>) -> Self {
        Self::Source {
            source: source.into(),
        }
    }

    /// Wrap an underlying error as a handler failure.
    pub fn handler(handler: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Handler {
            handler: handler.into(),
            source: source.into(),
        }
    }

    /// Wrap an underlying error as a sink failure.
    pub fn sink(source: impl Into<BoxError>) -> Self {
        Self::Sink {
            source: source.into(),
        }
    }

    /// Create an invalid-transition error.
    #[must_use]
    pub fn invalid_transition(from: StatusCode, to: StatusCode) -> Self {
        Self::InvalidTransition { from, to }
    }

    /// Create a worker-join error.
    pub fn worker(detail: impl Into<String>) -> Self {
        Self::Worker {
            detail: detail.into(),
        }
    }

    /// Returns `true` if this error is the cooperative cancellation signal.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if this error arose during pre-flight setup.
    #[must_use]
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::Setup { .. })
    }
}
