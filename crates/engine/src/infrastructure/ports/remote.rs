//! Remote playbook API port.
//!
//! The engine only ever talks to the remote collaborator through this trait.
//! Implementations speak the wire format; callers see domain aggregates.

use async_trait::async_trait;
use playbook_domain::{Play, Playbook, PlaybookId};

use super::error::ApiError;

/// Everything `GET /playbooks` returns, mapped onto the domain.
#[derive(Debug, Clone, Default)]
pub struct PlaybookSnapshot {
    pub playbooks: Vec<Playbook>,
    pub available_tags: Vec<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaybookApiPort: Send + Sync {
    /// Load every playbook visible to the caller, plus the tag list.
    async fn fetch_playbooks(&self) -> Result<PlaybookSnapshot, ApiError>;

    /// Create a playbook (metadata only; plays are written separately).
    async fn create_playbook(&self, playbook: &Playbook) -> Result<(), ApiError>;

    /// Overwrite a playbook's metadata.
    async fn update_playbook(&self, playbook: &Playbook) -> Result<(), ApiError>;

    /// Create a play, including its full version history.
    async fn create_play(&self, playbook_id: &PlaybookId, play: &Play) -> Result<(), ApiError>;

    /// Overwrite a play, including its full version history.
    async fn update_play(&self, playbook_id: &PlaybookId, play: &Play) -> Result<(), ApiError>;
}
