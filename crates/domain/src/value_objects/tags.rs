//! Free-form play tags and the grow-only index of every tag seen in a session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The tags attached to one play.
///
/// Tags are trimmed, blank tags are dropped and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags present in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a TagSet) -> impl Iterator<Item = &'a str> {
        self.0.difference(&other.0).map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|tag| tag.as_ref().trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        )
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.0.into_iter().collect()
    }
}

/// Every tag supplied to any play during a session.
///
/// The index only grows: removing a tag from a play never removes it here,
/// so typeahead suggestions stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex(BTreeSet<String>);

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every tag of `tags`, returning the ones that were not known yet.
    pub fn absorb(&mut self, tags: &TagSet) -> Vec<String> {
        tags.iter()
            .filter(|tag| self.0.insert((*tag).to_string()))
            .map(str::to_string)
            .collect()
    }

    /// Record raw tags (e.g. the remote `availableTags` list).
    pub fn absorb_raw<S: AsRef<str>>(&mut self, tags: impl IntoIterator<Item = S>) {
        let tags: TagSet = tags.into_iter().collect();
        self.absorb(&tags);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted snapshot of the index.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}
