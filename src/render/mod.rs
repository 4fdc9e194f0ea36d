//! Rendering abstraction for piece drawing
//!
//! The actual pixel backend lives outside this crate. Pieces draw through the
//! `Canvas` trait; `RecordingCanvas` captures the operation stream so tests
//! can assert on draw content and ordering.

pub mod colors;

use crate::core::types::Rect;
use colors::Color;

/// Drawing surface handed to the piece chain
pub trait Canvas {
    /// Fill a solid rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline with the given line thickness
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32);
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        thickness: i32,
    },
}

/// Canvas that records operations in submission order
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color,
            thickness,
        });
    }
}
