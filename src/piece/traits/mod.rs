//! Concrete piece traits and kind-tag dispatch

pub mod border;
pub mod dice;
pub mod marker;

pub use border::BorderOutline;
pub use dice::DiceResult;
pub use marker::Marker;

use crate::codec::kind_tag;
use crate::core::types::{Point, Rect};
use crate::piece::properties::PropValue;
use crate::piece::{GamePiece, TRAIT_DELIMITER};
use crate::render::Canvas;
use std::any::Any;

/// Wrap `inner` with the trait named by the type string's kind tag.
///
/// Unknown tags produce a [`Passthrough`] node that keeps the raw strings,
/// so chains written by newer revisions survive a decode/encode cycle here.
pub fn wrap(type_str: &str, inner: Box<dyn GamePiece>) -> Box<dyn GamePiece> {
    let tag = kind_tag(type_str, TRAIT_DELIMITER);
    match tag.as_str() {
        border::TAG => Box::new(BorderOutline::decode(type_str, inner)),
        marker::TAG => Box::new(Marker::decode(type_str, inner)),
        dice::TAG => Box::new(DiceResult::decode(type_str, inner)),
        _ => {
            tracing::debug!(%tag, "unknown trait kind, wrapping transparently");
            Box::new(Passthrough::new(type_str, inner))
        }
    }
}

/// Inert stand-in for a trait this revision does not know. Preserves the raw
/// type and state strings and forwards every query to the inner piece.
pub struct Passthrough {
    type_str: String,
    state: String,
    inner: Box<dyn GamePiece>,
}

impl Passthrough {
    pub fn new(type_str: &str, inner: Box<dyn GamePiece>) -> Self {
        Self {
            type_str: type_str.to_string(),
            state: String::new(),
            inner,
        }
    }
}

impl GamePiece for Passthrough {
    fn kind(&self) -> &str {
        // The foreign tag, so chain ordering still compares by kind
        let end = self.type_str.find(TRAIT_DELIMITER).unwrap_or(self.type_str.len());
        &self.type_str[..end]
    }

    fn my_type(&self) -> String {
        self.type_str.clone()
    }

    fn my_state(&self) -> String {
        self.state.clone()
    }

    fn my_set_state(&mut self, state: &str) {
        self.state = state.to_string();
    }

    fn inner(&self) -> Option<&dyn GamePiece> {
        Some(self.inner.as_ref())
    }

    fn inner_mut(&mut self) -> Option<&mut dyn GamePiece> {
        Some(self.inner.as_mut())
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn shape(&self) -> Rect {
        self.inner.shape()
    }

    fn bounding_box(&self) -> Rect {
        self.inner.bounding_box()
    }

    fn draw(&self, canvas: &mut dyn Canvas, pos: Point, zoom: f64, root: &dyn GamePiece) {
        self.inner.draw(canvas, pos, zoom, root);
    }

    fn get_property(&self, key: &str) -> Option<PropValue> {
        self.inner.get_property(key)
    }

    fn node_equals(&self, other: &dyn GamePiece) -> bool {
        match other.as_any().downcast_ref::<Passthrough>() {
            Some(o) => self.type_str == o.type_str,
            None => false,
        }
    }

    fn description(&self) -> String {
        format!("Unknown Trait - {}", self.kind())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
