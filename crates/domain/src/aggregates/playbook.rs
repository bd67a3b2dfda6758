//! Playbook aggregate - a team's collection of plays

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::aggregates::Play;
use crate::error::DomainError;
use crate::events::PlaybookUpdate;
use crate::ids::{PlayId, PlaybookId, TeamId};
use crate::value_objects::PlaybookName;

/// Every field of a playbook, as loaded from storage.
#[derive(Debug, Clone)]
pub struct PlaybookRecord {
    pub id: PlaybookId,
    pub name: PlaybookName,
    pub description: Option<String>,
    pub team_id: TeamId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub plays: Vec<Play>,
}

/// A named, team-scoped collection of plays.
///
/// # Invariants
///
/// - Play ids are unique within the playbook
#[derive(Debug, Clone, PartialEq)]
pub struct Playbook {
    id: PlaybookId,
    name: PlaybookName,
    description: Option<String>,
    team_id: TeamId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    plays: Vec<Play>,
}

impl Playbook {
    pub fn new(name: PlaybookName, team_id: TeamId, now: DateTime<Utc>) -> Self {
        Self {
            id: PlaybookId::new(),
            name,
            description: None,
            team_id,
            created_at: now,
            updated_at: now,
            plays: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Rebuild a playbook from storage.
    pub fn restore(record: PlaybookRecord) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(record.plays.len());
        for play in &record.plays {
            if !seen.insert(play.id().clone()) {
                return Err(DomainError::validation(format!(
                    "Duplicate play id {} in playbook {}",
                    play.id(),
                    record.id
                )));
            }
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            team_id: record.team_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            plays: record.plays,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &PlaybookId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &PlaybookName {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[inline]
    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn play(&self, id: &PlayId) -> Option<&Play> {
        self.plays.iter().find(|p| p.id() == id)
    }

    /// Mutable access to one play; the play enforces its own invariants.
    pub fn play_mut(&mut self, id: &PlayId) -> Option<&mut Play> {
        self.plays.iter_mut().find(|p| p.id() == id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add_play(&mut self, play: Play, now: DateTime<Utc>) -> Result<PlaybookUpdate, DomainError> {
        if self.play(play.id()).is_some() {
            return Err(DomainError::validation(format!(
                "Duplicate play id {} in playbook {}",
                play.id(),
                self.id
            )));
        }
        let play_id = play.id().clone();
        self.plays.push(play);
        self.updated_at = now;
        Ok(PlaybookUpdate::PlayAdded { play_id })
    }

    /// Rename the playbook. Returns `None` when the name is unchanged.
    pub fn set_name(&mut self, name: PlaybookName, now: DateTime<Utc>) -> Option<PlaybookUpdate> {
        if name == self.name {
            return None;
        }
        let previous = std::mem::replace(&mut self.name, name);
        self.updated_at = now;
        Some(PlaybookUpdate::NameChanged {
            from: previous,
            to: self.name.clone(),
        })
    }

    pub fn set_description(
        &mut self,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Option<PlaybookUpdate> {
        if description == self.description {
            return None;
        }
        let previous = std::mem::replace(&mut self.description, description);
        self.updated_at = now;
        Some(PlaybookUpdate::DescriptionChanged {
            from: previous,
            to: self.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::NewPlay;
    use crate::ids::UserId;
    use crate::value_objects::{PlayCategory, PlayName, UserRef};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn varsity() -> Playbook {
        Playbook::new(
            PlaybookName::new("Varsity").unwrap(),
            TeamId::parse("team-1").unwrap(),
            t0(),
        )
    }

    fn play(name: &str) -> Play {
        Play::new(
            NewPlay::new(PlayName::new(name).unwrap(), PlayCategory::Kickoffs),
            &UserRef::new(UserId::parse("u1").unwrap(), "Coach"),
            t0(),
        )
    }

    #[test]
    fn new_playbook_is_empty() {
        let playbook = varsity();
        assert_eq!(playbook.name().as_str(), "Varsity");
        assert_eq!(playbook.team_id().as_str(), "team-1");
        assert!(playbook.plays().is_empty());
    }

    #[test]
    fn add_play_rejects_duplicate_ids() {
        let mut playbook = varsity();
        let kickoff = play("Kickoff 1");
        playbook.add_play(kickoff.clone(), t0()).unwrap();

        let err = playbook.add_play(kickoff, t0()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(playbook.plays().len(), 1);
    }

    #[test]
    fn play_mut_finds_by_id() {
        let mut playbook = varsity();
        let kickoff = play("Kickoff 1");
        let id = kickoff.id().clone();
        playbook.add_play(kickoff, t0()).unwrap();

        assert!(playbook.play_mut(&id).is_some());
        assert!(playbook.play(&PlayId::parse("nope").unwrap()).is_none());
    }

    #[test]
    fn restore_rejects_duplicate_plays() {
        let kickoff = play("Kickoff 1");
        let result = Playbook::restore(PlaybookRecord {
            id: PlaybookId::parse("pb1").unwrap(),
            name: PlaybookName::new("Varsity").unwrap(),
            description: None,
            team_id: TeamId::parse("team-1").unwrap(),
            created_at: t0(),
            updated_at: t0(),
            plays: vec![kickoff.clone(), kickoff],
        });
        assert!(result.is_err());
    }

    #[test]
    fn unchanged_metadata_is_not_an_update() {
        let mut playbook = varsity();
        let later = t0() + chrono::Duration::hours(1);

        assert!(playbook
            .set_name(PlaybookName::new("Varsity").unwrap(), later)
            .is_none());
        assert!(playbook.set_description(None, later).is_none());
        assert_eq!(playbook.updated_at(), t0());

        let renamed = playbook.set_name(PlaybookName::new("JV").unwrap(), later);
        assert!(matches!(renamed, Some(PlaybookUpdate::NameChanged { .. })));
        assert_eq!(playbook.updated_at(), later);
    }
}
