//! Playbook and play CRUD.

use playbook_domain::{
    NewPlay, Play, PlayCategory, PlayDetailsUpdate, PlayId, PlayName, Playbook, PlaybookId,
    PlaybookName, TagSet, TeamId, UserRef,
};

use super::{
    normalize_description, CreatePlayInput, CreatePlaybookInput, PlaybookError, PlaybookSession,
    UpdatePlayInput, UpdatePlaybookInput,
};
use crate::stores::{ChangeKind, PendingChange};

impl PlaybookSession {
    /// Create an empty playbook for a team and add it to the collection.
    pub fn create_playbook(
        &mut self,
        input: CreatePlaybookInput,
        author: &UserRef,
    ) -> Result<Playbook, PlaybookError> {
        let name = PlaybookName::new(input.name)?;
        let team_id = TeamId::parse(input.team_id)?;
        let now = self.clock.now();

        let playbook = Playbook::new(name, team_id, now)
            .with_description(normalize_description(input.description));

        tracing::debug!(
            playbook_id = %playbook.id(),
            team_id = %playbook.team_id(),
            created_by = %author.id,
            "Created playbook"
        );

        self.store.push_playbook(playbook.clone());
        self.store.record_change(PendingChange::Playbook {
            playbook_id: playbook.id().clone(),
            kind: ChangeKind::Created,
        });
        Ok(playbook)
    }

    pub fn update_playbook(
        &mut self,
        playbook_id: &PlaybookId,
        input: UpdatePlaybookInput,
    ) -> Result<Playbook, PlaybookError> {
        // Validate before touching the playbook so a bad name leaves it unchanged.
        let name = input.name.map(PlaybookName::new).transpose()?;
        let now = self.clock.now();

        let playbook = self
            .store
            .playbook_mut(playbook_id)
            .ok_or_else(|| PlaybookError::not_found("Playbook", playbook_id.as_str()))?;

        let mut changes = Vec::new();
        if let Some(name) = name {
            changes.extend(playbook.set_name(name, now));
        }
        if let Some(description) = input.description {
            changes.extend(playbook.set_description(normalize_description(description), now));
        }
        let playbook = playbook.clone();

        tracing::debug!(
            playbook_id = %playbook_id,
            changes = changes.len(),
            "Updated playbook"
        );

        if !changes.is_empty() {
            self.store.record_change(PendingChange::Playbook {
                playbook_id: playbook_id.clone(),
                kind: ChangeKind::Updated,
            });
        }
        Ok(playbook)
    }

    /// Create a play with one "Version 1.0" holding an empty initial view.
    pub fn create_play(
        &mut self,
        playbook_id: &PlaybookId,
        input: CreatePlayInput,
        author: &UserRef,
    ) -> Result<Play, PlaybookError> {
        let name = PlayName::new(input.name)?;
        let category: PlayCategory = input.category.parse()?;
        let tags: TagSet = input.tags.into_iter().collect();
        let now = self.clock.now();

        let mut details = NewPlay::new(name, category).with_tags(tags);
        details.description = normalize_description(input.description);
        let play = Play::new(details, author, now);

        let playbook = self
            .store
            .playbook_mut(playbook_id)
            .ok_or_else(|| PlaybookError::not_found("Playbook", playbook_id.as_str()))?;
        playbook.add_play(play.clone(), now)?;

        let added = self.store.tags_mut().absorb(play.tags());
        tracing::debug!(
            play_id = %play.id(),
            playbook_id = %playbook_id,
            category = %play.category(),
            new_tags = ?added,
            "Created play"
        );

        self.store.record_change(PendingChange::Play {
            playbook_id: playbook_id.clone(),
            play_id: play.id().clone(),
            kind: ChangeKind::Created,
        });
        Ok(play)
    }

    /// Replace the supplied metadata fields of a play. Versions are untouched.
    pub fn update_play(
        &mut self,
        play_id: &PlayId,
        input: UpdatePlayInput,
    ) -> Result<Play, PlaybookError> {
        let update = PlayDetailsUpdate {
            name: input.name.map(PlayName::new).transpose()?,
            description: input.description.map(normalize_description),
            category: input
                .category
                .map(|c| c.parse::<PlayCategory>())
                .transpose()?,
            tags: input.tags.map(|tags| tags.into_iter().collect()),
            is_published: input.is_published,
        };
        let now = self.clock.now();

        let (playbook_id, play) = self
            .store
            .locate_play_mut(play_id)
            .ok_or_else(|| PlaybookError::not_found("Play", play_id.as_str()))?;

        let changes = play.apply_details(update, now);
        let play = play.clone();

        let added = self.store.tags_mut().absorb(play.tags());
        tracing::debug!(
            play_id = %play_id,
            changes = changes.len(),
            new_tags = ?added,
            "Updated play"
        );

        if !changes.is_empty() {
            self.store.record_change(PendingChange::Play {
                playbook_id,
                play_id: play_id.clone(),
                kind: ChangeKind::Updated,
            });
        }
        Ok(play)
    }
}
