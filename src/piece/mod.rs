//! Game pieces and the trait chain composition model
//!
//! A piece is a singly-linked ownership chain: zero or more trait nodes
//! wrapped around a terminal [`BasePiece`]. Queries enter at the outermost
//! node and flow inward unless a node intercepts them; drawing runs the other
//! way, inner first, so overlays paint atop the base.

pub mod chain;
pub mod properties;
pub mod traits;

use crate::codec::{SequenceDecoder, SequenceEncoder};
use crate::core::types::{PieceId, Point, Rect};
use crate::render::colors::Color;
use crate::render::Canvas;
use ahash::AHashMap;
use properties::PropValue;
use std::any::Any;

/// Delimiter used by all trait type and state strings
pub const TRAIT_DELIMITER: char = ';';

/// One node in a piece's trait chain.
///
/// Every node owns its inner piece exclusively; the holder of the outermost
/// node transitively owns the whole chain. `my_*` methods touch only this
/// node, never the chain below it.
pub trait GamePiece {
    /// Fixed tag identifying the trait variant
    fn kind(&self) -> &str;

    /// This node's configuration, encoded with the kind tag prefix.
    /// Decoding the result reconstructs an operationally equivalent node.
    fn my_type(&self) -> String;

    /// This node's runtime state, encoded without a kind tag
    fn my_state(&self) -> String;

    /// Replace this node's runtime state; configuration and inner piece are
    /// untouched. Never fails: malformed fields decode to defaults.
    fn my_set_state(&mut self, state: &str);

    /// The piece this node wraps, `None` at the terminal base piece
    fn inner(&self) -> Option<&dyn GamePiece>;

    fn inner_mut(&mut self) -> Option<&mut dyn GamePiece>;

    /// Display name of the piece, delegated unless a trait overrides it
    fn name(&self) -> String;

    /// Selection outline in piece-local coordinates
    fn shape(&self) -> Rect;

    /// Visual extent in piece-local coordinates; traits that paint outside
    /// the inner extent return the union of both
    fn bounding_box(&self) -> Rect;

    /// Draw at `pos`. Inner content is drawn before this node's own overlay.
    /// `root` is the outermost node of the whole chain so gating properties
    /// can resolve against traits anywhere in it, including ones wrapped
    /// outward of this node.
    fn draw(&self, canvas: &mut dyn Canvas, pos: Point, zoom: f64, root: &dyn GamePiece);

    /// This node's definition of `key`, or the inner piece's. Entered at the
    /// outermost node this is the chain-wide resolution: outer wins.
    fn get_property(&self, key: &str) -> Option<PropValue>;

    /// Structural identity of this node alone: same trait variant and equal
    /// identity configuration fields. Runtime state and fields marked
    /// non-identity (free-text descriptions) are excluded.
    fn node_equals(&self, other: &dyn GamePiece) -> bool;

    /// Human-readable summary of this trait for editors and logs
    fn description(&self) -> String;

    fn as_any(&self) -> &dyn Any;
}

/// Draw a whole piece, threading the outermost node through as the property
/// resolution root.
pub fn draw_piece(piece: &dyn GamePiece, canvas: &mut dyn Canvas, pos: Point, zoom: f64) {
    piece.draw(canvas, pos, zoom, piece);
}

/// Terminal node of every chain: a plain colored counter
#[derive(Debug, Clone)]
pub struct BasePiece {
    name: String,
    width: i32,
    height: i32,
    color: Color,
}

impl BasePiece {
    pub const TAG: &'static str = "piece";

    pub fn new(name: impl Into<String>, width: i32, height: i32, color: Color) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            color,
        }
    }

    /// Decode from a type string; missing fields fall back to a small gray
    /// counter, so any input produces a valid piece
    pub fn decode(type_str: &str) -> Self {
        let mut d = SequenceDecoder::new(type_str, TRAIT_DELIMITER);
        d.next_token(); // kind tag
        let name = d.next_str("");
        let width = d.next_int(48) as i32;
        let height = d.next_int(48) as i32;
        let color = d.next_color(Color::new(128, 128, 128));
        Self::new(name, width, height, color)
    }
}

impl Default for BasePiece {
    fn default() -> Self {
        Self::decode("")
    }
}

impl GamePiece for BasePiece {
    fn kind(&self) -> &str {
        Self::TAG
    }

    fn my_type(&self) -> String {
        SequenceEncoder::new(TRAIT_DELIMITER)
            .append(Self::TAG)
            .append(&self.name)
            .append_int(self.width as i64)
            .append_int(self.height as i64)
            .append_color(self.color)
            .value()
    }

    fn my_state(&self) -> String {
        String::new()
    }

    fn my_set_state(&mut self, _state: &str) {}

    fn inner(&self) -> Option<&dyn GamePiece> {
        None
    }

    fn inner_mut(&mut self) -> Option<&mut dyn GamePiece> {
        None
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn shape(&self) -> Rect {
        Rect::centered(self.width, self.height)
    }

    fn bounding_box(&self) -> Rect {
        Rect::centered(self.width, self.height)
    }

    fn draw(&self, canvas: &mut dyn Canvas, pos: Point, zoom: f64, _root: &dyn GamePiece) {
        canvas.fill_rect(self.bounding_box().scaled(zoom).translated(pos), self.color);
    }

    fn get_property(&self, _key: &str) -> Option<PropValue> {
        None
    }

    fn node_equals(&self, other: &dyn GamePiece) -> bool {
        match other.as_any().downcast_ref::<BasePiece>() {
            Some(o) => {
                self.name == o.name
                    && self.width == o.width
                    && self.height == o.height
                    && self.color == o.color
            }
            None => false,
        }
    }

    fn description(&self) -> String {
        format!("Basic Piece - {}", self.name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Live pieces on the table, keyed by handle.
///
/// Roll completions check membership here before applying: a completion for
/// a removed piece is stale and gets discarded.
#[derive(Default)]
pub struct PieceRegistry {
    pieces: AHashMap<PieceId, Box<dyn GamePiece>>,
}

impl PieceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, piece: Box<dyn GamePiece>) -> PieceId {
        let id = PieceId::new();
        self.pieces.insert(id, piece);
        id
    }

    pub fn get(&self, id: PieceId) -> Option<&dyn GamePiece> {
        self.pieces.get(&id).map(|p| p.as_ref())
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Box<dyn GamePiece>> {
        self.pieces.get_mut(&id)
    }

    pub fn remove(&mut self, id: PieceId) -> Option<Box<dyn GamePiece>> {
        self.pieces.remove(&id)
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.pieces.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
