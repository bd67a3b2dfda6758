//! Diagram entities - the primitives a view is drawn from.

pub mod animation;
pub mod diagram;

pub use animation::{AnimationTrack, Keyframe, Pose};
pub use diagram::{Line, Point, Position, Text};
