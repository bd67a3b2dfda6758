//! Playbook domain - the tactical play entity graph and its rules.
//!
//! - [`entities`] - diagram primitives and keyframe animation
//! - [`aggregates`] - View, Version, Play and Playbook
//! - [`branching`] - structural version cloning with id remapping
//! - [`value_objects`] - validated names, categories, tags, user identity

pub mod aggregates;
pub mod branching;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    NewPlay, Play, PlayDetailsUpdate, PlayRecord, Playbook, PlaybookRecord, PositionFrame,
    Version, View, ViewUpdate,
};
pub use branching::BranchRequest;
pub use entities::{AnimationTrack, Keyframe, Line, Point, Pose, Position, Text};
pub use error::DomainError;
pub use events::{PlayUpdate, PlaybookUpdate};
pub use ids::{LineId, PlayId, PlaybookId, PositionId, TeamId, TextId, UserId, VersionId, ViewId};
pub use value_objects::{
    PlayCategory, PlayName, PlaybookName, TagIndex, TagSet, UserRef, VersionName, ViewName,
};
