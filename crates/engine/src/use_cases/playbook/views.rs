//! View edits within a version.

use std::sync::Arc;

use playbook_domain::{PlayId, VersionId, View, ViewId, ViewName, ViewUpdate};

use super::{PlaybookError, PlaybookSession};
use crate::stores::{ChangeKind, PendingChange};

impl PlaybookSession {
    /// Replace the supplied fields of one view.
    ///
    /// Only the edited view and its version get new allocations; every other
    /// view and version keeps its `Arc`. On error the play is unchanged.
    pub fn update_play_view(
        &mut self,
        play_id: &PlayId,
        version_id: &VersionId,
        view_id: &ViewId,
        update: ViewUpdate,
    ) -> Result<Arc<View>, PlaybookError> {
        let now = self.clock.now();

        let (playbook_id, play) = self
            .store
            .locate_play_mut(play_id)
            .ok_or_else(|| PlaybookError::not_found("Play", play_id.as_str()))?;

        let view = play.update_view(version_id, view_id, update, now)?;
        tracing::debug!(
            play_id = %play_id,
            version_id = %version_id,
            view_id = %view_id,
            positions = view.positions().len(),
            animations = view.animations().len(),
            "Updated play view"
        );

        self.store.record_change(PendingChange::Play {
            playbook_id,
            play_id: play_id.clone(),
            kind: ChangeKind::Updated,
        });
        Ok(view)
    }

    /// Append an empty alternative view to a version.
    pub fn add_play_view(
        &mut self,
        play_id: &PlayId,
        version_id: &VersionId,
        name: &str,
    ) -> Result<Arc<View>, PlaybookError> {
        let name = ViewName::new(name)?;
        let now = self.clock.now();

        let (playbook_id, play) = self
            .store
            .locate_play_mut(play_id)
            .ok_or_else(|| PlaybookError::not_found("Play", play_id.as_str()))?;

        let view = play.add_view(version_id, name, now)?;
        tracing::debug!(
            play_id = %play_id,
            version_id = %version_id,
            view_id = %view.id(),
            "Added play view"
        );

        self.store.record_change(PendingChange::Play {
            playbook_id,
            play_id: play_id.clone(),
            kind: ChangeKind::Updated,
        });
        Ok(view)
    }
}
