//! Wire format of the remote playbook API and its mapping onto the domain.
//!
//! The wire is camelCase JSON with ISO-8601 dates. Older records may not carry
//! diagram content yet, so version/view/primitive lists default to empty.
//! A version's `name` on the wire is a bare version-number label ("1.0"),
//! which the domain renders as "Version 1.0".

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use playbook_domain::{
    AnimationTrack, DomainError, Line, PlayCategory, PlayId, PlayName, PlayRecord, Play, Playbook,
    PlaybookId, PlaybookName, PlaybookRecord, Position, TagSet, TeamId, Text, UserId, UserRef,
    Version, VersionId, VersionName, View, ViewId, ViewName, ViewUpdate,
};

use crate::infrastructure::ports::PlaybookSnapshot;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybooksResponse {
    #[serde(default)]
    pub playbooks: Vec<PlaybookDto>,
    #[serde(default)]
    pub available_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookDto {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub team_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plays: Vec<PlayDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayDto {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub versions: Vec<VersionDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDto {
    pub id: String,
    /// Version-number label, e.g. "1.0"
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub created_by_name: String,
    #[serde(default)]
    pub views: Vec<ViewDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub texts: Vec<Text>,
    #[serde(default)]
    pub animations: Vec<AnimationTrack>,
    #[serde(default)]
    pub is_initial_view: bool,
}

// =============================================================================
// Version labels
// =============================================================================

/// "1.0" -> "Version 1.0"; anything that is not a bare label is kept.
pub fn version_name_from_wire(raw: &str) -> Result<VersionName, DomainError> {
    VersionName::new(raw)
}

/// "Version 1.0" -> "1.0"; free-text names are sent as they are.
pub fn version_name_to_wire(name: &VersionName) -> String {
    name.label().unwrap_or(name.as_str()).to_string()
}

// =============================================================================
// Wire -> domain
// =============================================================================

pub fn snapshot_from_wire(response: PlaybooksResponse) -> Result<PlaybookSnapshot, DomainError> {
    let mut seen = HashSet::new();
    for dto in &response.playbooks {
        if !seen.insert(dto.id.as_str()) {
            return Err(DomainError::validation(format!(
                "Duplicate playbook id {}",
                dto.id
            )));
        }
    }

    let playbooks = response
        .playbooks
        .into_iter()
        .map(playbook_from_wire)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PlaybookSnapshot {
        playbooks,
        available_tags: response.available_tags,
    })
}

pub fn playbook_from_wire(dto: PlaybookDto) -> Result<Playbook, DomainError> {
    let plays = dto
        .plays
        .into_iter()
        .map(play_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Playbook::restore(PlaybookRecord {
        id: PlaybookId::parse(dto.id)?,
        name: PlaybookName::new(dto.name)?,
        description: dto.description,
        team_id: TeamId::parse(dto.team_id)?,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
        plays,
    })
}

pub fn play_from_wire(dto: PlayDto) -> Result<Play, DomainError> {
    let versions = dto
        .versions
        .into_iter()
        .map(version_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    // Records without a pointer follow the latest version
    let current_version_id = match dto.current_version_id {
        Some(raw) => Some(VersionId::parse(raw)?),
        None => versions.last().map(|v| v.id().clone()),
    };

    Play::restore(PlayRecord {
        id: PlayId::parse(dto.id)?,
        name: PlayName::new(dto.name)?,
        description: dto.description,
        category: dto.category.parse::<PlayCategory>()?,
        tags: dto.tags.into_iter().collect::<TagSet>(),
        is_published: dto.is_published,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
        author_id: UserId::parse(dto.author_id)?,
        author_name: dto.author_name,
        versions,
        current_version_id,
    })
}

pub fn version_from_wire(dto: VersionDto) -> Result<Version, DomainError> {
    let author = UserRef::new(UserId::parse(dto.created_by)?, dto.created_by_name);
    let views = dto
        .views
        .into_iter()
        .map(view_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(
        Version::new(version_name_from_wire(&dto.name)?, &author, dto.created_at, views)?
            .with_id(VersionId::parse(dto.id)?)
            .with_description(dto.description),
    )
}

pub fn view_from_wire(dto: ViewDto) -> Result<View, DomainError> {
    View::new(ViewName::new(dto.name)?)
        .with_id(ViewId::parse(dto.id)?)
        .with_initial_view(dto.is_initial_view)
        .apply(
            ViewUpdate::new()
                .with_positions(dto.positions)
                .with_lines(dto.lines)
                .with_texts(dto.texts)
                .with_animations(dto.animations),
        )
}

// =============================================================================
// Domain -> wire
// =============================================================================

impl From<&Playbook> for PlaybookDto {
    /// Metadata only; plays are written through their own endpoint.
    fn from(playbook: &Playbook) -> Self {
        Self {
            id: playbook.id().to_string(),
            name: playbook.name().to_string(),
            description: playbook.description().map(str::to_string),
            team_id: playbook.team_id().to_string(),
            created_at: playbook.created_at(),
            updated_at: playbook.updated_at(),
            plays: Vec::new(),
        }
    }
}

impl From<&Play> for PlayDto {
    fn from(play: &Play) -> Self {
        Self {
            id: play.id().to_string(),
            name: play.name().to_string(),
            description: play.description().map(str::to_string),
            category: play.category().as_str().to_string(),
            tags: play.tags().to_vec(),
            is_published: play.is_published(),
            created_at: play.created_at(),
            updated_at: play.updated_at(),
            author_id: play.author_id().to_string(),
            author_name: play.author_name().to_string(),
            versions: play.versions().iter().map(|v| VersionDto::from(v.as_ref())).collect(),
            current_version_id: play.current_version_id().map(ToString::to_string),
        }
    }
}

impl From<&Version> for VersionDto {
    fn from(version: &Version) -> Self {
        Self {
            id: version.id().to_string(),
            name: version_name_to_wire(version.name()),
            description: version.description().map(str::to_string),
            created_at: version.created_at(),
            created_by: version.created_by().to_string(),
            created_by_name: version.created_by_name().to_string(),
            views: version.views().iter().map(|v| ViewDto::from(v.as_ref())).collect(),
        }
    }
}

impl From<&View> for ViewDto {
    fn from(view: &View) -> Self {
        Self {
            id: view.id().to_string(),
            name: view.name().to_string(),
            positions: view.positions().to_vec(),
            lines: view.lines().to_vec(),
            texts: view.texts().to_vec(),
            animations: view.animations().to_vec(),
            is_initial_view: view.is_initial_view(),
        }
    }
}
