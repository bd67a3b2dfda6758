//! View aggregate - one named diagram state within a version
//!
//! A view bundles positions, lines, texts and animation tracks. Views are
//! values: an edit produces a new `View` through [`View::apply`], which
//! validates the candidate before handing it back. The original is never
//! touched, so a rejected update cannot leave a half-applied view behind.
//!
//! # Invariants
//!
//! - Primitive ids are unique within the view (tracks are keyed by position)
//! - Every animation track references a position of the same view
//! - Lines have at least two points
//! - Keyframes are in ascending time order
//! - All coordinates are finite

use std::collections::HashSet;

use crate::entities::{AnimationTrack, Line, Pose, Position, Text};
use crate::error::DomainError;
use crate::ids::{PositionId, ViewId};
use crate::value_objects::ViewName;

/// A named snapshot of diagram primitives.
///
/// # Example
///
/// ```
/// use playbook_domain::{Position, View, ViewUpdate};
///
/// let view = View::initial();
/// let edited = view
///     .apply(ViewUpdate::new().with_positions(vec![Position::new(0.5, 0.5)]))
///     .unwrap();
///
/// assert!(view.positions().is_empty());
/// assert_eq!(edited.positions().len(), 1);
/// assert_eq!(edited.id(), view.id());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    id: ViewId,
    name: ViewName,
    positions: Vec<Position>,
    lines: Vec<Line>,
    texts: Vec<Text>,
    animations: Vec<AnimationTrack>,
    /// Advisory default display state; zero or several views may carry it
    is_initial_view: bool,
}

/// Whole-field replacement for a view. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewUpdate {
    pub name: Option<ViewName>,
    pub positions: Option<Vec<Position>>,
    pub lines: Option<Vec<Line>>,
    pub texts: Option<Vec<Text>>,
    pub animations: Option<Vec<AnimationTrack>>,
}

impl ViewUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: ViewName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_positions(mut self, positions: Vec<Position>) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = Some(lines);
        self
    }

    pub fn with_texts(mut self, texts: Vec<Text>) -> Self {
        self.texts = Some(texts);
        self
    }

    pub fn with_animations(mut self, animations: Vec<AnimationTrack>) -> Self {
        self.animations = Some(animations);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.positions.is_none()
            && self.lines.is_none()
            && self.texts.is_none()
            && self.animations.is_none()
    }
}

/// Sampled pose of one position at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFrame {
    pub position_id: PositionId,
    pub pose: Pose,
}

impl View {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an empty, non-initial view.
    pub fn new(name: ViewName) -> Self {
        Self {
            id: ViewId::new(),
            name,
            positions: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            animations: Vec::new(),
            is_initial_view: false,
        }
    }

    /// Create the empty default view every new play starts with.
    pub fn initial() -> Self {
        Self::new(ViewName::initial()).with_initial_view(true)
    }

    /// Set the view's ID (used when loading from storage).
    pub fn with_id(mut self, id: ViewId) -> Self {
        self.id = id;
        self
    }

    pub fn with_initial_view(mut self, is_initial_view: bool) -> Self {
        self.is_initial_view = is_initial_view;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &ViewId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &ViewName {
        &self.name
    }

    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    pub fn texts(&self) -> &[Text] {
        &self.texts
    }

    #[inline]
    pub fn animations(&self) -> &[AnimationTrack] {
        &self.animations
    }

    #[inline]
    pub fn is_initial_view(&self) -> bool {
        self.is_initial_view
    }

    pub fn position(&self, id: &PositionId) -> Option<&Position> {
        self.positions.iter().find(|p| &p.id == id)
    }

    pub fn animation_for(&self, id: &PositionId) -> Option<&AnimationTrack> {
        self.animations.iter().find(|a| &a.position_id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
            && self.animations.is_empty()
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Produce a validated copy of this view with `update` applied.
    ///
    /// The id and the initial-view flag are kept. Supplying a field replaces
    /// that whole field.
    pub fn apply(&self, update: ViewUpdate) -> Result<View, DomainError> {
        let candidate = View {
            id: self.id.clone(),
            name: update.name.unwrap_or_else(|| self.name.clone()),
            positions: update.positions.unwrap_or_else(|| self.positions.clone()),
            lines: update.lines.unwrap_or_else(|| self.lines.clone()),
            texts: update.texts.unwrap_or_else(|| self.texts.clone()),
            animations: update
                .animations
                .unwrap_or_else(|| self.animations.clone()),
            is_initial_view: self.is_initial_view,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    /// Assemble a view from already-owned parts without validation.
    ///
    /// Only the branch engine uses this, on parts cloned from a valid view.
    pub(crate) fn from_cloned_parts(
        name: ViewName,
        positions: Vec<Position>,
        lines: Vec<Line>,
        texts: Vec<Text>,
        animations: Vec<AnimationTrack>,
        is_initial_view: bool,
    ) -> Self {
        Self {
            id: ViewId::new(),
            name,
            positions,
            lines,
            texts,
            animations,
            is_initial_view,
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check every structural invariant of the view.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut position_ids = HashSet::with_capacity(self.positions.len());
        for position in &self.positions {
            if position.id.is_empty() {
                return Err(DomainError::validation("Position id cannot be empty"));
            }
            if !position_ids.insert(&position.id) {
                return Err(DomainError::validation(format!(
                    "Duplicate position id {} in view {}",
                    position.id, self.id
                )));
            }
            if !(position.x.is_finite() && position.y.is_finite() && position.rotation.is_finite())
            {
                return Err(DomainError::validation(format!(
                    "Position {} has non-finite coordinates",
                    position.id
                )));
            }
        }

        let mut line_ids = HashSet::with_capacity(self.lines.len());
        for line in &self.lines {
            if line.id.is_empty() {
                return Err(DomainError::validation("Line id cannot be empty"));
            }
            if !line_ids.insert(&line.id) {
                return Err(DomainError::validation(format!(
                    "Duplicate line id {} in view {}",
                    line.id, self.id
                )));
            }
            if line.points.len() < 2 {
                return Err(DomainError::validation(format!(
                    "Line {} needs at least two points, got {}",
                    line.id,
                    line.points.len()
                )));
            }
            if !line.width.is_finite() || !line.points.iter().all(|p| p.is_finite()) {
                return Err(DomainError::validation(format!(
                    "Line {} has non-finite geometry",
                    line.id
                )));
            }
        }

        let mut text_ids = HashSet::with_capacity(self.texts.len());
        for text in &self.texts {
            if text.id.is_empty() {
                return Err(DomainError::validation("Text id cannot be empty"));
            }
            if !text_ids.insert(&text.id) {
                return Err(DomainError::validation(format!(
                    "Duplicate text id {} in view {}",
                    text.id, self.id
                )));
            }
            let box_finite = text.width.map_or(true, f64::is_finite)
                && text.height.map_or(true, f64::is_finite);
            if !(text.x.is_finite() && text.y.is_finite() && text.font_size.is_finite() && box_finite)
            {
                return Err(DomainError::validation(format!(
                    "Text {} has non-finite geometry",
                    text.id
                )));
            }
        }

        let mut animated = HashSet::with_capacity(self.animations.len());
        for track in &self.animations {
            if !position_ids.contains(&track.position_id) {
                return Err(DomainError::validation(format!(
                    "Animation references unknown position {} in view {}",
                    track.position_id, self.id
                )));
            }
            if !animated.insert(&track.position_id) {
                return Err(DomainError::validation(format!(
                    "Position {} has more than one animation track",
                    track.position_id
                )));
            }
            track.validate_keyframes()?;
        }

        Ok(())
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Length of the view's animation: the latest keyframe of any track.
    pub fn duration(&self) -> f64 {
        self.animations
            .iter()
            .map(AnimationTrack::duration)
            .fold(0.0, f64::max)
    }

    /// Pose of every position at `time`. Unanimated positions stay put.
    pub fn frame_at(&self, time: f64) -> Vec<PositionFrame> {
        self.positions
            .iter()
            .map(|position| {
                let rest = Pose::of(position);
                let pose = match self.animation_for(&position.id) {
                    Some(track) => track.sample(time, rest),
                    None => rest,
                };
                PositionFrame {
                    position_id: position.id.clone(),
                    pose,
                }
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
