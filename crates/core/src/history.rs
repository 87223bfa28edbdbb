//! Shared types for the revision-history write path.

use serde::{Deserialize, Serialize};

/// Which part of a page a revert restores.
///
/// - `Content` -- restore the content body only.
/// - `Data`    -- restore the structured metadata only.
/// - `Both`    -- restore content and metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevertScope {
    Content,
    Data,
    Both,
}

impl RevertScope {
    /// String representation for display, logging, and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Data => "data",
            Self::Both => "both",
        }
    }

    /// `true` if this scope restores the content body.
    pub fn includes_content(&self) -> bool {
        matches!(self, Self::Content | Self::Both)
    }

    /// `true` if this scope restores structured metadata.
    pub fn includes_data(&self) -> bool {
        matches!(self, Self::Data | Self::Both)
    }
}

impl std::fmt::Display for RevertScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_returns_correct_strings() {
        assert_eq!(RevertScope::Content.as_str(), "content");
        assert_eq!(RevertScope::Data.as_str(), "data");
        assert_eq!(RevertScope::Both.as_str(), "both");
    }

    #[test]
    fn scope_inclusion() {
        assert!(RevertScope::Content.includes_content());
        assert!(!RevertScope::Content.includes_data());
        assert!(RevertScope::Data.includes_data());
        assert!(!RevertScope::Data.includes_content());
        assert!(RevertScope::Both.includes_content());
        assert!(RevertScope::Both.includes_data());
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&RevertScope::Both).unwrap();
        assert_eq!(json, "\"both\"");
        let parsed: RevertScope = serde_json::from_str("\"content\"").unwrap();
        assert_eq!(parsed, RevertScope::Content);
    }
}
