//! Playbook session use cases.
//!
//! A [`PlaybookSession`] owns one [`PlaybookStore`] and the ports it syncs
//! through. Mutations are synchronous and local; they land in the store's
//! pending-change log and reach the remote API only through
//! [`PlaybookSession::commit_changes`].

mod manage;
mod sync;
mod versions;
mod views;

use std::sync::Arc;

use playbook_domain::{DomainError, VersionId};

use crate::infrastructure::ports::{ApiError, ClockPort, PlaybookApiPort};
use crate::stores::PlaybookStore;

/// Error type for playbook use cases.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybookError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Transport error: {0}")]
    Transport(#[from] ApiError),
}

impl PlaybookError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }
}

impl From<DomainError> for PlaybookError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Parse(msg) => Self::Validation(msg),
            DomainError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
        }
    }
}

// =============================================================================
// Inputs
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct CreatePlaybookInput {
    pub name: String,
    pub description: Option<String>,
    pub team_id: String,
}

/// `None` leaves a field untouched. `Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlaybookInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct CreatePlayInput {
    pub name: String,
    pub description: Option<String>,
    /// Wire code, e.g. `CORNER_KICKS`.
    pub category: String,
    pub tags: Vec<String>,
}

/// Whole-field replacement of the supplied play metadata.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlayInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateVersionInput {
    pub name: String,
    pub description: Option<String>,
    pub based_on_version_id: Option<VersionId>,
}

// =============================================================================
// Session
// =============================================================================

/// One editing session over the playbook collection.
pub struct PlaybookSession {
    store: PlaybookStore,
    api: Arc<dyn PlaybookApiPort>,
    clock: Arc<dyn ClockPort>,
}

impl PlaybookSession {
    pub fn new(api: Arc<dyn PlaybookApiPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            store: PlaybookStore::new(),
            api,
            clock,
        }
    }

    /// Read access to the loaded collection and its indexes.
    pub fn store(&self) -> &PlaybookStore {
        &self.store
    }
}

/// Trim a free-text description, treating blank text as absent.
fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_onto_session_errors() {
        assert_eq!(
            PlaybookError::from(DomainError::validation("bad")),
            PlaybookError::Validation("bad".to_string())
        );
        assert_eq!(
            PlaybookError::from(DomainError::parse("unknown")),
            PlaybookError::Validation("unknown".to_string())
        );
        assert_eq!(
            PlaybookError::from(DomainError::not_found("Play", "p1")),
            PlaybookError::not_found("Play", "p1")
        );
    }

    #[test]
    fn transport_errors_convert() {
        let err: PlaybookError = ApiError::request_failed("timeout").into();
        assert!(matches!(err, PlaybookError::Transport(ApiError::RequestFailed(_))));
    }

    #[test]
    fn blank_descriptions_are_dropped() {
        assert_eq!(normalize_description(Some("  ".into())), None);
        assert_eq!(
            normalize_description(Some(" Near post ".into())),
            Some("Near post".to_string())
        );
        assert_eq!(normalize_description(None), None);
    }
}
