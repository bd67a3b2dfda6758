//! Value objects - immutable, validated-by-construction domain values.

pub mod category;
pub mod names;
pub mod tags;
pub mod user;

pub use category::PlayCategory;
pub use names::{PlayName, PlaybookName, VersionName, ViewName};
pub use tags::{TagIndex, TagSet};
pub use user::UserRef;
