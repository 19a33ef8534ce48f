//! Transport action classification.

use serde::{Deserialize, Serialize};

/// What shape of transport an action performs.
///
/// The pipeline itself treats every kind identically; the tag exists for the
/// orchestration layer above (scheduling, display, log fields).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// No concrete wiring chosen yet.
    #[default]
    Empty,
    /// Load records into a store from an external feed.
    Load,
    /// Move records from one store to another.
    Move,
    /// Execute a write command without a record stream of its own.
    Exec,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Load => write!(f, "load"),
            Self::Move => write!(f, "move"),
            Self::Exec => write!(f, "exec"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert_eq!(TransportKind::default(), TransportKind::Empty);
    }

    #[test]
    fn display_formatting() {
        assert_eq!(TransportKind::Move.to_string(), "move");
        assert_eq!(TransportKind::Exec.to_string(), "exec");
    }

    #[test]
    fn serde_rename_snake_case() {
        let json = serde_json::to_string(&TransportKind::Load).unwrap();
        assert_eq!(json, "\"load\"");

        let back: TransportKind = serde_json::from_str("\"move\"").unwrap();
        assert_eq!(back, TransportKind::Move);
    }
}
