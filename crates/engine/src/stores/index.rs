//! Lookups across the loaded playbook collection.
//!
//! Linear scans: the expected scale is tens of playbooks and low hundreds of
//! plays, so no secondary index is kept.

use std::sync::Arc;

use playbook_domain::{Play, PlayCategory, PlayId, Playbook, PlaybookId, TeamId, Version};

use super::playbooks::PlaybookStore;

impl PlaybookStore {
    pub fn get_playbook(&self, id: &PlaybookId) -> Option<&Playbook> {
        self.playbooks.iter().find(|p| p.id() == id)
    }

    pub fn get_play(&self, id: &PlayId) -> Option<&Play> {
        self.all_plays().find(|p| p.id() == id)
    }

    pub fn playbooks_for_team(&self, team_id: &TeamId) -> Vec<&Playbook> {
        self.playbooks
            .iter()
            .filter(|p| p.team_id() == team_id)
            .collect()
    }

    /// Every play in the given category, across all playbooks.
    pub fn plays_by_category(&self, category: PlayCategory) -> Vec<&Play> {
        self.all_plays()
            .filter(|p| p.category() == category)
            .collect()
    }

    /// Every play carrying exactly `tag`, across all playbooks.
    pub fn plays_by_tag(&self, tag: &str) -> Vec<&Play> {
        self.all_plays().filter(|p| p.tags().contains(tag)).collect()
    }

    /// Sorted snapshot of every tag seen this session.
    pub fn available_tags(&self) -> Vec<String> {
        self.tags().to_vec()
    }

    fn all_plays(&self) -> impl Iterator<Item = &Play> {
        self.playbooks.iter().flat_map(|p| p.plays())
    }
}

/// Resolve a play's current version, logging when the pointer is stale.
pub fn current_version(play: &Play) -> Option<&Arc<Version>> {
    let version = play.current_version();
    if version.is_none() {
        tracing::warn!(
            play_id = %play.id(),
            current_version_id = ?play.current_version_id().map(|id| id.as_str()),
            "Play has no resolvable current version"
        );
    }
    version
}
