//! Diagram primitives - the atomic drawable elements of a view.
//!
//! Coordinates are normalized surface coordinates; rendering is somebody
//! else's problem. Primitives are plain data: a [`View`](crate::View) owns
//! them and is responsible for validating them as a set.

use serde::{Deserialize, Serialize};

use crate::ids::{LineId, PositionId, TextId};

/// A point on the diagram surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A player or opponent marker placed on a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default)]
    pub is_opponent: bool,
    /// Facing, in degrees
    #[serde(default)]
    pub rotation: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            id: PositionId::new(),
            x,
            y,
            player_number: None,
            player_name: None,
            is_opponent: false,
            rotation: 0.0,
        }
    }

    pub fn with_id(mut self, id: PositionId) -> Self {
        self.id = id;
        self
    }

    pub fn with_player(mut self, number: u32, name: impl Into<String>) -> Self {
        self.player_number = Some(number);
        self.player_name = Some(name.into());
        self
    }

    pub fn opponent(mut self) -> Self {
        self.is_opponent = true;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

/// A drawn polyline (runs, passes, screens).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: LineId,
    /// At least two points
    pub points: Vec<Point>,
    pub color: String,
    pub width: f64,
    #[serde(default)]
    pub dashed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_end: Option<bool>,
}

impl Line {
    pub fn new(points: Vec<Point>, color: impl Into<String>, width: f64) -> Self {
        Self {
            id: LineId::new(),
            points,
            color: color.into(),
            width,
            dashed: false,
            arrow_end: None,
        }
    }

    pub fn with_id(mut self, id: LineId) -> Self {
        self.id = id;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn with_arrow(mut self) -> Self {
        self.arrow_end = Some(true);
        self
    }
}

/// A free-floating text label. `width`/`height` describe an optional wrap box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub id: TextId,
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_size: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Text {
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            id: TextId::new(),
            x,
            y,
            content: content.into(),
            font_size: 14.0,
            color: "#000000".to_string(),
            bold: None,
            italic: None,
            width: None,
            height: None,
        }
    }

    pub fn with_id(mut self, id: TextId) -> Self {
        self.id = id;
        self
    }

    pub fn with_box(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}
