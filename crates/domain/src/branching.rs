//! Version branching - structural clones with freshly minted identities.
//!
//! A branch never shares a view or primitive with its base. Every view,
//! position, line and text receives a new id; animation tracks are rewritten
//! through an old-to-new position id map built while the positions are
//! cloned, so a track in the branch can only ever point into its own view.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregates::View;
use crate::entities::{AnimationTrack, Line, Position, Text};
use crate::error::DomainError;
use crate::ids::{LineId, PositionId, TextId, VersionId};
use crate::value_objects::VersionName;

/// Parameters for creating a new version of a play.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchRequest {
    pub name: VersionName,
    pub description: Option<String>,
    /// Version to clone; the play's current version when absent
    pub based_on: Option<VersionId>,
}

impl BranchRequest {
    pub fn new(name: VersionName) -> Self {
        Self {
            name,
            description: None,
            based_on: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn based_on(mut self, version_id: VersionId) -> Self {
        self.based_on = Some(version_id);
        self
    }
}

/// Clone a single view, minting new ids for it and every primitive.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a track of the source view points at
/// a position the view does not contain.
pub fn clone_view(view: &View) -> Result<View, DomainError> {
    let mut position_ids: HashMap<&PositionId, PositionId> =
        HashMap::with_capacity(view.positions().len());

    let positions: Vec<Position> = view
        .positions()
        .iter()
        .map(|position| {
            let fresh = PositionId::new();
            position_ids.insert(&position.id, fresh.clone());
            Position {
                id: fresh,
                ..position.clone()
            }
        })
        .collect();

    let lines = view
        .lines()
        .iter()
        .map(|line| Line {
            id: LineId::new(),
            ..line.clone()
        })
        .collect();

    let texts = view
        .texts()
        .iter()
        .map(|text| Text {
            id: TextId::new(),
            ..text.clone()
        })
        .collect();

    let animations = view
        .animations()
        .iter()
        .map(|track| {
            let position_id = position_ids.get(&track.position_id).ok_or_else(|| {
                DomainError::validation(format!(
                    "Animation references unknown position {} in view {}",
                    track.position_id,
                    view.id()
                ))
            })?;
            Ok(AnimationTrack {
                position_id: position_id.clone(),
                keyframes: track.keyframes.clone(),
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(View::from_cloned_parts(
        view.name().clone(),
        positions,
        lines,
        texts,
        animations,
        view.is_initial_view(),
    ))
}

/// Clone every view of a version, preserving order.
pub fn clone_views(views: &[Arc<View>]) -> Result<Vec<View>, DomainError> {
    views.iter().map(|view| clone_view(view)).collect()
}
