//! Version history operations.

use std::sync::Arc;

use playbook_domain::{BranchRequest, PlayId, UserRef, Version, VersionId, VersionName};

use super::{normalize_description, CreateVersionInput, PlaybookError, PlaybookSession};
use crate::stores::{ChangeKind, PendingChange};

impl PlaybookSession {
    /// Branch a new version off `based_on_version_id` (or the current version)
    /// and make it current.
    ///
    /// Every view of the base is cloned with fresh ids; animation tracks are
    /// rewritten to follow their positions.
    pub fn create_play_version(
        &mut self,
        play_id: &PlayId,
        input: CreateVersionInput,
        author: &UserRef,
    ) -> Result<Arc<Version>, PlaybookError> {
        let mut request = BranchRequest::new(VersionName::new(input.name)?);
        if let Some(description) = normalize_description(input.description) {
            request = request.with_description(description);
        }
        if let Some(base) = input.based_on_version_id {
            request = request.based_on(base);
        }
        let now = self.clock.now();

        let (playbook_id, play) = self
            .store
            .locate_play_mut(play_id)
            .ok_or_else(|| PlaybookError::not_found("Play", play_id.as_str()))?;

        let version = play.branch_version(&request, author, now)?;
        tracing::debug!(
            play_id = %play_id,
            version_id = %version.id(),
            version_name = %version.name(),
            views = version.views().len(),
            "Branched play version"
        );

        self.store.record_change(PendingChange::Play {
            playbook_id,
            play_id: play_id.clone(),
            kind: ChangeKind::Updated,
        });
        Ok(version)
    }

    /// Move a play's current pointer to an existing version.
    pub fn set_current_version(
        &mut self,
        play_id: &PlayId,
        version_id: &VersionId,
    ) -> Result<Arc<Version>, PlaybookError> {
        let now = self.clock.now();

        let (playbook_id, play) = self
            .store
            .locate_play_mut(play_id)
            .ok_or_else(|| PlaybookError::not_found("Play", play_id.as_str()))?;

        let change = play.set_current_version(version_id, now)?;
        let version = play
            .current_version()
            .cloned()
            .ok_or_else(|| PlaybookError::not_found("Version", version_id.as_str()))?;
        tracing::debug!(play_id = %play_id, change = ?change, "Switched current version");

        self.store.record_change(PendingChange::Play {
            playbook_id,
            play_id: play_id.clone(),
            kind: ChangeKind::Updated,
        });
        Ok(version)
    }
}
