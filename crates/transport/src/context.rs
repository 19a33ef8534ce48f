//! Runtime context for one action execution.

use tokio_util::sync::CancellationToken;

use crate::error::TransportError;

/// Runtime context carried into the worker loop.
///
/// Holds the cooperative cancellation token. Clones share the same token, so
/// a context cloned into the worker observes cancellation requested through
/// any other clone. Cancellation requests originate outside this crate; the
/// pipeline only polls.
#[derive(Debug, Clone, Default)]
pub struct TransportContext {
    cancellation: CancellationToken,
}

impl TransportContext {
    /// Create a context with a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancellation: CancellationToken::new(),
        }
    }

    /// Replace the cancellation token with an externally supplied one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// The cancellation token.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Returns `true` if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Check if cancellation has been requested.
    pub fn check_cancelled(&self) -> Result<(), TransportError> {
        if self.cancellation.is_cancelled() {
            Err(TransportError::Cancelled)
        } else {
            Ok(())
        }
    }
}
