//! Play aggregate - a named tactic with an append-only version history
//!
//! # History model
//!
//! `versions` is a log: new versions are only ever appended, never inserted,
//! reordered or removed. `current_version_id` is a pointer into that log. The
//! pointer is resolved on every use and may be stale for data loaded from
//! elsewhere, in which case [`Play::current_version`] returns `None`.
//!
//! Editing a view swaps in a new `Arc<Version>` at the same log slot; versions
//! that were not edited keep their `Arc` identity.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::aggregates::{Version, View, ViewUpdate};
use crate::branching::BranchRequest;
use crate::error::DomainError;
use crate::events::PlayUpdate;
use crate::ids::{PlayId, UserId, VersionId, ViewId};
use crate::value_objects::{PlayCategory, PlayName, TagSet, UserRef, ViewName};

/// Details supplied when creating a play.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlay {
    pub name: PlayName,
    pub description: Option<String>,
    pub category: PlayCategory,
    pub tags: TagSet,
}

impl NewPlay {
    pub fn new(name: PlayName, category: PlayCategory) -> Self {
        Self {
            name,
            description: None,
            category,
            tags: TagSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }
}

/// Metadata edits. `None` leaves a field untouched; `tags` replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayDetailsUpdate {
    pub name: Option<PlayName>,
    pub description: Option<Option<String>>,
    pub category: Option<PlayCategory>,
    pub tags: Option<TagSet>,
    pub is_published: Option<bool>,
}

/// Every field of a play, as loaded from storage.
#[derive(Debug, Clone)]
pub struct PlayRecord {
    pub id: PlayId,
    pub name: PlayName,
    pub description: Option<String>,
    pub category: PlayCategory,
    pub tags: TagSet,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: UserId,
    pub author_name: String,
    pub versions: Vec<Version>,
    pub current_version_id: Option<VersionId>,
}

/// A tactical play.
///
/// # Invariants
///
/// - Version ids are unique within the play
/// - `versions` only grows, in creation order
/// - Plays created here always point at an existing version
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use playbook_domain::{NewPlay, Play, PlayCategory, PlayName, UserId, UserRef};
///
/// let coach = UserRef::new(UserId::new(), "Coach");
/// let play = Play::new(
///     NewPlay::new(PlayName::new("Corner A").unwrap(), PlayCategory::CornerKicks),
///     &coach,
///     Utc::now(),
/// );
///
/// assert_eq!(play.versions().len(), 1);
/// assert_eq!(play.current_version().unwrap().name().as_str(), "Version 1.0");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    // Identity
    id: PlayId,

    // Metadata
    name: PlayName,
    description: Option<String>,
    category: PlayCategory,
    tags: TagSet,
    is_published: bool,

    // Audit
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: UserId,
    author_name: String,

    // History
    versions: Vec<Arc<Version>>,
    current_version_id: Option<VersionId>,
}

impl Play {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a play with a single "Version 1.0" holding one empty initial view.
    pub fn new(details: NewPlay, author: &UserRef, now: DateTime<Utc>) -> Self {
        let first = Version::first(author, now);
        let current = first.id().clone();
        Self {
            id: PlayId::new(),
            name: details.name,
            description: details.description,
            category: details.category,
            tags: details.tags,
            is_published: false,
            created_at: now,
            updated_at: now,
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            versions: vec![Arc::new(first)],
            current_version_id: Some(current),
        }
    }

    /// Rebuild a play from storage.
    ///
    /// The current pointer is accepted even when it does not resolve; callers
    /// go through [`Play::current_version`], which tolerates that.
    pub fn restore(record: PlayRecord) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(record.versions.len());
        for version in &record.versions {
            if !seen.insert(version.id().clone()) {
                return Err(DomainError::validation(format!(
                    "Duplicate version id {} in play {}",
                    version.id(),
                    record.id
                )));
            }
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            category: record.category,
            tags: record.tags,
            is_published: record.is_published,
            created_at: record.created_at,
            updated_at: record.updated_at,
            author_id: record.author_id,
            author_name: record.author_name,
            versions: record.versions.into_iter().map(Arc::new).collect(),
            current_version_id: record.current_version_id,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &PlayId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &PlayName {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn category(&self) -> PlayCategory {
        self.category
    }

    #[inline]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    #[inline]
    pub fn is_published(&self) -> bool {
        self.is_published
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
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    #[inline]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    #[inline]
    pub fn versions(&self) -> &[Arc<Version>] {
        &self.versions
    }

    #[inline]
    pub fn current_version_id(&self) -> Option<&VersionId> {
        self.current_version_id.as_ref()
    }

    pub fn version(&self, id: &VersionId) -> Option<&Arc<Version>> {
        self.versions.iter().find(|v| v.id() == id)
    }

    /// Resolve the current pointer. `None` when it is unset or stale.
    pub fn current_version(&self) -> Option<&Arc<Version>> {
        self.current_version_id
            .as_ref()
            .and_then(|id| self.version(id))
    }

    // =========================================================================
    // Metadata mutations
    // =========================================================================

    /// Apply metadata edits, bumping `updated_at` when anything changed.
    pub fn apply_details(&mut self, update: PlayDetailsUpdate, now: DateTime<Utc>) -> Vec<PlayUpdate> {
        let mut changes = Vec::new();

        if let Some(name) = update.name {
            if name != self.name {
                let previous = std::mem::replace(&mut self.name, name);
                changes.push(PlayUpdate::NameChanged {
                    from: previous,
                    to: self.name.clone(),
                });
            }
        }
        if let Some(description) = update.description {
            if description != self.description {
                let previous = std::mem::replace(&mut self.description, description);
                changes.push(PlayUpdate::DescriptionChanged {
                    from: previous,
                    to: self.description.clone(),
                });
            }
        }
        if let Some(category) = update.category {
            if category != self.category {
                let previous = std::mem::replace(&mut self.category, category);
                changes.push(PlayUpdate::CategoryChanged {
                    from: previous,
                    to: self.category,
                });
            }
        }
        if let Some(tags) = update.tags {
            if tags != self.tags {
                let added = tags.difference(&self.tags).map(str::to_string).collect();
                let removed = self.tags.difference(&tags).map(str::to_string).collect();
                self.tags = tags;
                changes.push(PlayUpdate::TagsReplaced { added, removed });
            }
        }
        if let Some(is_published) = update.is_published {
            if is_published != self.is_published {
                let previous = std::mem::replace(&mut self.is_published, is_published);
                changes.push(PlayUpdate::PublishedChanged {
                    from: previous,
                    to: self.is_published,
                });
            }
        }

        if !changes.is_empty() {
            self.updated_at = now;
        }
        changes
    }

    // =========================================================================
    // History mutations
    // =========================================================================

    /// Branch a new version and make it current.
    ///
    /// The base is `request.based_on` when given, else the current version.
    ///
    /// # Errors
    ///
    /// `NotFound` when the base cannot be resolved.
    pub fn branch_version(
        &mut self,
        request: &BranchRequest,
        author: &UserRef,
        now: DateTime<Utc>,
    ) -> Result<Arc<Version>, DomainError> {
        let base = match &request.based_on {
            Some(id) => self
                .version(id)
                .ok_or_else(|| DomainError::not_found("Version", id.as_str()))?,
            None => self.current_version().ok_or_else(|| {
                DomainError::not_found(
                    "Version",
                    self.current_version_id
                        .as_ref()
                        .map_or("<unset>", VersionId::as_str),
                )
            })?,
        };

        let branch = Arc::new(base.branch(request, author, now)?);
        self.current_version_id = Some(branch.id().clone());
        self.versions.push(branch.clone());
        self.updated_at = now;
        Ok(branch)
    }

    /// Replace one view of one version with `update` applied.
    ///
    /// On any error the play is left exactly as it was.
    pub fn update_view(
        &mut self,
        version_id: &VersionId,
        view_id: &ViewId,
        update: ViewUpdate,
        now: DateTime<Utc>,
    ) -> Result<Arc<View>, DomainError> {
        let index = self.version_index(version_id)?;
        let version = &self.versions[index];
        let view = version
            .view(view_id)
            .ok_or_else(|| DomainError::not_found("View", view_id.as_str()))?;

        let edited = view.apply(update)?;
        let next = version.replacing_view(edited)?;
        let result = next
            .view(view_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("View", view_id.as_str()))?;

        self.versions[index] = Arc::new(next);
        self.updated_at = now;
        Ok(result)
    }

    /// Append an empty, non-initial view to a version.
    pub fn add_view(
        &mut self,
        version_id: &VersionId,
        name: ViewName,
        now: DateTime<Utc>,
    ) -> Result<Arc<View>, DomainError> {
        let index = self.version_index(version_id)?;
        let view = View::new(name);
        let view_id = view.id().clone();
        let next = self.versions[index].adding_view(view)?;
        let result = next
            .view(&view_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("View", view_id.as_str()))?;

        self.versions[index] = Arc::new(next);
        self.updated_at = now;
        Ok(result)
    }

    /// Point the play at an existing version. History is untouched.
    pub fn set_current_version(
        &mut self,
        version_id: &VersionId,
        now: DateTime<Utc>,
    ) -> Result<PlayUpdate, DomainError> {
        self.version_index(version_id)?;
        let previous = self.current_version_id.replace(version_id.clone());
        self.updated_at = now;
        Ok(PlayUpdate::CurrentVersionChanged {
            from: previous,
            to: version_id.clone(),
        })
    }

    fn version_index(&self, version_id: &VersionId) -> Result<usize, DomainError> {
        self.versions
            .iter()
            .position(|v| v.id() == version_id)
            .ok_or_else(|| DomainError::not_found("Version", version_id.as_str()))
    }
}

// ============================================================================
// Tests
// ============================================================================
