//! Opaque string identifiers.
//!
//! Ids minted locally are UUID v4 strings. Ids loaded from the remote API are
//! kept verbatim, so the only structural rule is "non-empty after trimming".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh, never-before-used id.
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Accept an id assigned elsewhere (e.g. by the remote API).
            pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
                let raw = raw.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!(
                        $label,
                        " id cannot be empty"
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Aggregate ids
define_id!(PlaybookId, "Playbook");
define_id!(PlayId, "Play");
define_id!(VersionId, "Version");
define_id!(ViewId, "View");

// Diagram primitive ids
define_id!(PositionId, "Position");
define_id!(LineId, "Line");
define_id!(TextId, "Text");

// Collaborator ids
define_id!(TeamId, "Team");
define_id!(UserId, "User");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let a = PositionId::new();
        let b = PositionId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn parse_keeps_remote_ids_verbatim() {
        let id = PlayId::parse("play-42").unwrap();
        assert_eq!(id.as_str(), "play-42");
        assert_eq!(id.to_string(), "play-42");
    }

    #[test]
    fn parse_rejects_blank_ids() {
        let err = ViewId::parse("   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: View id cannot be empty");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = VersionId::parse("v1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"v1\"");
        let back: VersionId = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(back, id);
    }
}
