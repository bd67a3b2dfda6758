//! Mutation outcomes returned by aggregate methods.

pub mod play_events;

pub use play_events::{PlayUpdate, PlaybookUpdate};
