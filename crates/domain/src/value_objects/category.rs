//! Play categories - the closed set of set-piece situations a play belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Category of a tactical play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayCategory {
    Defense,
    CornerKicks,
    SideOuts,
    GoalKicks,
    Kickoffs,
    /// Indirect free kicks
    Indirect,
    /// Direct free kicks
    Direct,
}

impl PlayCategory {
    /// Every category, in presentation order.
    pub const ALL: [PlayCategory; 7] = [
        PlayCategory::Defense,
        PlayCategory::CornerKicks,
        PlayCategory::SideOuts,
        PlayCategory::GoalKicks,
        PlayCategory::Kickoffs,
        PlayCategory::Indirect,
        PlayCategory::Direct,
    ];

    /// Wire code (e.g. `CORNER_KICKS`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Defense => "DEFENSE",
            Self::CornerKicks => "CORNER_KICKS",
            Self::SideOuts => "SIDE_OUTS",
            Self::GoalKicks => "GOAL_KICKS",
            Self::Kickoffs => "KICKOFFS",
            Self::Indirect => "INDIRECT",
            Self::Direct => "DIRECT",
        }
    }

    /// Human-readable label for presentation layers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Defense => "Defense",
            Self::CornerKicks => "Corner Kicks",
            Self::SideOuts => "Side Outs",
            Self::GoalKicks => "Goal Kicks",
            Self::Kickoffs => "Kickoffs",
            Self::Indirect => "Indirect Free Kicks",
            Self::Direct => "Direct Free Kicks",
        }
    }
}

impl fmt::Display for PlayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| DomainError::validation(format!("Unknown play category: {}", s)))
    }
}
