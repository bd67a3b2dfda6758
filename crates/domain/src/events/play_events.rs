//! Play and playbook mutation outcomes.

use crate::ids::{PlayId, VersionId};
use crate::value_objects::{PlayCategory, PlayName, PlaybookName};

/// Outcome of updating play fields or history.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayUpdate {
    NameChanged {
        from: PlayName,
        to: PlayName,
    },
    DescriptionChanged {
        from: Option<String>,
        to: Option<String>,
    },
    CategoryChanged {
        from: PlayCategory,
        to: PlayCategory,
    },
    TagsReplaced {
        added: Vec<String>,
        removed: Vec<String>,
    },
    PublishedChanged {
        from: bool,
        to: bool,
    },
    CurrentVersionChanged {
        from: Option<VersionId>,
        to: VersionId,
    },
}

/// Outcome of updating playbook fields.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybookUpdate {
    NameChanged {
        from: PlaybookName,
        to: PlaybookName,
    },
    DescriptionChanged {
        from: Option<String>,
        to: Option<String>,
    },
    PlayAdded {
        play_id: PlayId,
    },
}
