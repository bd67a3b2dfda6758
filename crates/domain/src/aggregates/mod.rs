//! Aggregate roots - domain objects that own their related data
//!
//! The ownership chain is Playbook → Play → Version → View → primitives.
//!
//! # Rustic DDD Principles
//!
//! | Concern | Rustic Equivalent |
//! |---------|-------------------|
//! | Private fields + getters | Newtypes valid by construction |
//! | Aggregate root guards | Ownership (borrow checker enforces) |
//! | Immutable history | `Arc` snapshots, edits return new values |
//! | Factory pattern | `::new()` + builder pattern |
//! | Domain Events | Return enums from mutations |

pub mod play;
pub mod playbook;
pub mod version;
pub mod view;

pub use play::{NewPlay, Play, PlayDetailsUpdate, PlayRecord};
pub use playbook::{Playbook, PlaybookRecord};
pub use version::Version;
pub use view::{PositionFrame, View, ViewUpdate};
