//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a piece placed on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub Uuid);

impl PieceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PieceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier for a UI control that can trigger rolls (e.g. a dice button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlId(pub u32);

/// 2D position in table coordinates (pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in table coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle centered on the origin, the convention for piece extents
    pub fn centered(width: i32, height: i32) -> Self {
        Self {
            x: -width / 2,
            y: -height / 2,
            width,
            height,
        }
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = (self.x + self.width).max(other.x + other.width);
        let y2 = (self.y + self.height).max(other.y + other.height);
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Grow outward by `amount` on every side
    pub fn grown(&self, amount: i32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2 * amount,
            self.height + 2 * amount,
        )
    }

    /// Translate by a screen offset
    pub fn translated(&self, origin: Point) -> Rect {
        Rect::new(self.x + origin.x, self.y + origin.y, self.width, self.height)
    }

    /// Scale around the origin, rounding dimensions toward zero
    pub fn scaled(&self, zoom: f64) -> Rect {
        Rect::new(
            (self.x as f64 * zoom) as i32,
            (self.y as f64 * zoom) as i32,
            (self.width as f64 * zoom) as i32,
            (self.height as f64 * zoom) as i32,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
