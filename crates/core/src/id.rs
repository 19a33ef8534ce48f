//! Action identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum allowed length for an [`ActionId`], in bytes.
const ACTION_ID_MAX_LEN: usize = 128;

/// Errors from constructing an [`ActionId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionIdError {
    /// The input was empty.
    #[error("action id cannot be empty")]
    Empty,
    /// The input has leading or trailing whitespace.
    #[error("action id cannot have surrounding whitespace")]
    SurroundingWhitespace,
    /// The input exceeds [`ACTION_ID_MAX_LEN`] bytes.
    #[error("action id exceeds maximum length of {} bytes", ACTION_ID_MAX_LEN)]
    TooLong,
}

/// An opaque identifier for one transport action.
///
/// Ids are assigned at action construction and never change; the orchestration
/// layer that owns many actions is responsible for keeping them unique within
/// one run. The string itself is opaque: no casing or charset rules beyond
/// being non-empty, at most 128 bytes, and free of surrounding whitespace.
///
/// # Examples
///
/// ```
/// use ferry_core::ActionId;
///
/// let id: ActionId = "nightly-orders-load".parse().unwrap();
/// assert_eq!(id.as_str(), "nightly-orders-load");
///
/// let generated = ActionId::random();
/// assert_ne!(generated, ActionId::random());
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionId(String);

impl ActionId {
    /// Create a new `ActionId`, validating the input.
    pub fn new(raw: impl Into<String>) -> Result<Self, ActionIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ActionIdError::Empty);
        }
        if raw.trim() != raw {
            return Err(ActionIdError::SurroundingWhitespace);
        }
        if raw.len() > ACTION_ID_MAX_LEN {
            return Err(ActionIdError::TooLong);
        }
        Ok(Self(raw))
    }

    /// Generate a random id (a 32-character hex UUID v4).
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Return the inner string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ActionId {
    type Err = ActionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ActionId {
    type Error = ActionIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ActionId {
    type Error = ActionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionId> for String {
    fn from(id: ActionId) -> Self {
        id.0
    }
}

impl AsRef<str> for ActionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ActionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ActionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for ActionId {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}
