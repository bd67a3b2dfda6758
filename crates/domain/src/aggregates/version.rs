//! Version aggregate - an immutable snapshot of a play's views
//!
//! A version never changes in place. Views are held behind `Arc`, and every
//! edit builds a new `Version` value that shares the untouched views with its
//! predecessor. The play swaps the new value in, so anybody still holding the
//! old `Arc<Version>` keeps seeing exactly what they saw before.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::aggregates::View;
use crate::branching::{self, BranchRequest};
use crate::error::DomainError;
use crate::ids::{UserId, VersionId, ViewId};
use crate::value_objects::{UserRef, VersionName};

/// A named, authored set of views.
///
/// # Invariants
///
/// - View ids are unique within the version
/// - Every view satisfies the view invariants
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    id: VersionId,
    name: VersionName,
    description: Option<String>,
    created_at: DateTime<Utc>,
    created_by: UserId,
    created_by_name: String,
    views: Vec<Arc<View>>,
}

impl Version {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// The first version of a new play: "Version 1.0" with one empty initial view.
    pub fn first(author: &UserRef, now: DateTime<Utc>) -> Self {
        Self {
            id: VersionId::new(),
            name: VersionName::first(),
            description: None,
            created_at: now,
            created_by: author.id.clone(),
            created_by_name: author.name.clone(),
            views: vec![Arc::new(View::initial())],
        }
    }

    /// Create a version from a list of views, validating all of them.
    pub fn new(
        name: VersionName,
        author: &UserRef,
        now: DateTime<Utc>,
        views: Vec<View>,
    ) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(views.len());
        for view in &views {
            if !seen.insert(view.id().clone()) {
                return Err(DomainError::validation(format!(
                    "Duplicate view id {} in version {}",
                    view.id(),
                    name
                )));
            }
            view.validate()?;
        }

        Ok(Self {
            id: VersionId::new(),
            name,
            description: None,
            created_at: now,
            created_by: author.id.clone(),
            created_by_name: author.name.clone(),
            views: views.into_iter().map(Arc::new).collect(),
        })
    }

    /// Set the version's ID (used when loading from storage).
    pub fn with_id(mut self, id: VersionId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &VersionId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &VersionName {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    #[inline]
    pub fn created_by_name(&self) -> &str {
        &self.created_by_name
    }

    #[inline]
    pub fn views(&self) -> &[Arc<View>] {
        &self.views
    }

    pub fn view(&self, id: &ViewId) -> Option<&Arc<View>> {
        self.views.iter().find(|v| v.id() == id)
    }

    /// The default display view: the first flagged view, else the first view.
    pub fn initial_view(&self) -> Option<&Arc<View>> {
        self.views
            .iter()
            .find(|v| v.is_initial_view())
            .or_else(|| self.views.first())
    }

    // =========================================================================
    // Derivations (each returns a new value)
    // =========================================================================

    /// Branch a new version from this one. See [`crate::branching`].
    pub fn branch(
        &self,
        request: &BranchRequest,
        author: &UserRef,
        now: DateTime<Utc>,
    ) -> Result<Version, DomainError> {
        let views = branching::clone_views(&self.views)?;
        Ok(Version {
            id: VersionId::new(),
            name: request.name.clone(),
            description: request.description.clone(),
            created_at: now,
            created_by: author.id.clone(),
            created_by_name: author.name.clone(),
            views: views.into_iter().map(Arc::new).collect(),
        })
    }

    /// Same version with one view swapped for `view` (matched by id).
    ///
    /// Sibling views keep their `Arc` identity.
    pub(crate) fn replacing_view(&self, view: View) -> Result<Version, DomainError> {
        let index = self
            .views
            .iter()
            .position(|v| v.id() == view.id())
            .ok_or_else(|| DomainError::not_found("View", view.id().as_str()))?;

        let mut next = self.clone();
        next.views[index] = Arc::new(view);
        Ok(next)
    }

    /// Same version with `view` appended.
    pub(crate) fn adding_view(&self, view: View) -> Result<Version, DomainError> {
        if self.view(view.id()).is_some() {
            return Err(DomainError::validation(format!(
                "Duplicate view id {} in version {}",
                view.id(),
                self.id
            )));
        }
        let mut next = self.clone();
        next.views.push(Arc::new(view));
        Ok(next)
    }
}
