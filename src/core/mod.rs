pub mod config;
pub mod error;
pub mod types;

pub use types::{ControlId, PieceId, Point, Rect};
