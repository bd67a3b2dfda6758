//! Validated name newtypes for playbook entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name fields
const MAX_NAME_LENGTH: usize = 200;

macro_rules! define_name {
    ($(#[$meta:meta])* $name:ident, $label:literal $(, normalize = $normalize:path)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new validated name.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if:
            /// - The name is empty after trimming
            /// - The name exceeds 200 characters after trimming
            pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!(
                        $label,
                        " name cannot be empty"
                    )));
                }
                let value = trimmed.to_string();
                $(let value = $normalize(value);)?
                if value.chars().count() > MAX_NAME_LENGTH {
                    return Err(DomainError::validation(format!(
                        concat!($label, " name cannot exceed {} characters"),
                        MAX_NAME_LENGTH
                    )));
                }
                Ok(Self(value))
            }

            /// Returns the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> String {
                name.0
            }
        }
    };
}

define_name!(
    /// A validated playbook name (e.g. "Varsity")
    PlaybookName,
    "Playbook"
);

define_name!(
    /// A validated play name (e.g. "Corner A")
    PlayName,
    "Play"
);

define_name!(
    /// A validated version name (e.g. "Version 1.0")
    ///
    /// A bare numeric label such as "2.0" is stored as "Version 2.0".
    VersionName,
    "Version",
    normalize = prefix_version_label
);

define_name!(
    /// A validated view name (e.g. "Initial Setup")
    ViewName,
    "View"
);

const VERSION_PREFIX: &str = "Version ";

/// True for numeric labels like "1.0" or "2.10".
fn is_version_label(raw: &str) -> bool {
    raw.starts_with(|c: char| c.is_ascii_digit())
        && raw.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn prefix_version_label(name: String) -> String {
    if is_version_label(&name) {
        format!("{VERSION_PREFIX}{name}")
    } else {
        name
    }
}

impl VersionName {
    /// Name given to the first version of every new play.
    pub fn first() -> Self {
        Self("Version 1.0".to_string())
    }

    /// The numeric label when the name has the "Version <label>" form.
    pub fn label(&self) -> Option<&str> {
        self.0
            .strip_prefix(VERSION_PREFIX)
            .filter(|rest| is_version_label(rest))
    }
}

impl ViewName {
    /// Name given to the initial view of a freshly created version.
    pub fn initial() -> Self {
        Self("Initial Setup".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = PlayName::new("  Corner A  ").unwrap();
        assert_eq!(name.as_str(), "Corner A");
    }

    #[test]
    fn rejects_empty() {
        let err = PlayName::new("   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Play name cannot be empty");
    }

    #[test]
    fn rejects_overlong() {
        let err = PlaybookName::new("x".repeat(201)).unwrap_err();
        assert!(err.to_string().contains("cannot exceed 200"));
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: ViewName = serde_json::from_str("\"Developed\"").unwrap();
        assert_eq!(ok.as_str(), "Developed");
        assert!(serde_json::from_str::<ViewName>("\"\"").is_err());
    }

    #[test]
    fn bare_version_labels_gain_the_prefix() {
        let name = VersionName::new(" 2.0 ").unwrap();
        assert_eq!(name.as_str(), "Version 2.0");
        assert_eq!(name.label(), Some("2.0"));
        assert_eq!(VersionName::new("Version 2.0").unwrap(), name);

        let free = VersionName::new("Corner A v2").unwrap();
        assert_eq!(free.as_str(), "Corner A v2");
        assert_eq!(free.label(), None);
        assert_eq!(VersionName::new("Version two").unwrap().label(), None);
    }

    #[test]
    fn version_label_shape() {
        assert!(is_version_label("1.0"));
        assert!(is_version_label("12"));
        assert!(!is_version_label(".5"));
        assert!(!is_version_label("v2"));
        assert!(!is_version_label(""));
    }

    #[test]
    fn defaults() {
        assert_eq!(VersionName::first().as_str(), "Version 1.0");
        assert_eq!(ViewName::initial().as_str(), "Initial Setup");
    }
}
