//! In-memory playbook collection.
//!
//! Owns everything the session knows: the loaded playbooks, the tag index,
//! the outcome of the last sync and the log of local changes that have not
//! been written back yet. The store is created empty and discarded with its
//! session, so two sessions never share tags or pending writes.

use chrono::{DateTime, Utc};
use playbook_domain::{Play, PlayId, Playbook, PlaybookId, TagIndex};

use crate::infrastructure::ports::PlaybookSnapshot;

/// Outcome of the most recent fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    NotLoaded,
    Loaded {
        at: DateTime<Utc>,
    },
    Failed {
        message: String,
        at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
}

/// A local change waiting for an explicit commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Playbook {
        playbook_id: PlaybookId,
        kind: ChangeKind,
    },
    Play {
        playbook_id: PlaybookId,
        play_id: PlayId,
        kind: ChangeKind,
    },
}

impl PendingChange {
    fn same_target(&self, other: &PendingChange) -> bool {
        match (self, other) {
            (
                PendingChange::Playbook { playbook_id: a, .. },
                PendingChange::Playbook { playbook_id: b, .. },
            ) => a == b,
            (PendingChange::Play { play_id: a, .. }, PendingChange::Play { play_id: b, .. }) => {
                a == b
            }
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct PlaybookStore {
    pub(super) playbooks: Vec<Playbook>,
    tags: TagIndex,
    sync_state: SyncState,
    pending: Vec<PendingChange>,
}

impl PlaybookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playbooks(&self) -> &[Playbook] {
        &self.playbooks
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync_state
    }

    /// Message of the last failed fetch, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match &self.sync_state {
            SyncState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn pending_changes(&self) -> &[PendingChange] {
        &self.pending
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    // =========================================================================
    // Mutation helpers (used by the session)
    // =========================================================================

    pub(crate) fn tags_mut(&mut self) -> &mut TagIndex {
        &mut self.tags
    }

    pub(crate) fn push_playbook(&mut self, playbook: Playbook) {
        self.playbooks.push(playbook);
    }

    pub(crate) fn playbook_mut(&mut self, id: &PlaybookId) -> Option<&mut Playbook> {
        self.playbooks.iter_mut().find(|p| p.id() == id)
    }

    /// Find a play anywhere in the collection, with the id of its playbook.
    pub(crate) fn locate_play_mut(&mut self, id: &PlayId) -> Option<(PlaybookId, &mut Play)> {
        self.playbooks.iter_mut().find_map(|playbook| {
            let playbook_id = playbook.id().clone();
            playbook.play_mut(id).map(|play| (playbook_id, play))
        })
    }

    /// Record a change; a target that is already pending keeps its first entry.
    pub(crate) fn record_change(&mut self, change: PendingChange) {
        if !self.pending.iter().any(|p| p.same_target(&change)) {
            self.pending.push(change);
        }
    }

    /// Drop a change once it has been written.
    pub(crate) fn complete_change(&mut self, change: &PendingChange) {
        self.pending.retain(|p| p != change);
    }

    /// Replace the whole collection with a fresh snapshot.
    ///
    /// Remote tags and the tags of every loaded play are merged into the
    /// session's tag index, which never shrinks.
    pub(crate) fn load(&mut self, snapshot: PlaybookSnapshot, now: DateTime<Utc>) {
        self.tags.absorb_raw(&snapshot.available_tags);
        for play in snapshot.playbooks.iter().flat_map(|p| p.plays()) {
            self.tags.absorb(play.tags());
        }

        self.playbooks = snapshot.playbooks;
        self.pending.clear();
        self.sync_state = SyncState::Loaded { at: now };
    }

    /// Record a failed fetch. Stale data is dropped rather than kept around.
    pub(crate) fn fail(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.playbooks.clear();
        self.pending.clear();
        self.sync_state = SyncState::Failed {
            message: message.into(),
            at: now,
        };
    }
}
