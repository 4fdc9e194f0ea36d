//! Trait that defines one static named property on a piece

use crate::codec::{SequenceDecoder, SequenceEncoder};
use crate::core::types::{Point, Rect};
use crate::piece::properties::PropValue;
use crate::piece::{GamePiece, TRAIT_DELIMITER};
use crate::render::Canvas;
use std::any::Any;

pub const TAG: &str = "mark";

/// Invisible key/value tag. Everything except property resolution is a pure
/// pass-through; resolution for the configured key stops here, shadowing any
/// inner definition of the same key.
pub struct Marker {
    key: String,
    value: String,
    inner: Box<dyn GamePiece>,
}

impl Marker {
    pub fn decode(type_str: &str, inner: Box<dyn GamePiece>) -> Self {
        let mut d = SequenceDecoder::new(type_str, TRAIT_DELIMITER);
        d.next_token(); // kind tag
        Self {
            key: d.next_str(""),
            value: d.next_str(""),
            inner,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl GamePiece for Marker {
    fn kind(&self) -> &str {
        TAG
    }

    fn my_type(&self) -> String {
        SequenceEncoder::new(TRAIT_DELIMITER)
            .append(TAG)
            .append(&self.key)
            .append(&self.value)
            .value()
    }

    fn my_state(&self) -> String {
        String::new()
    }

    fn my_set_state(&mut self, _state: &str) {}

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
        if !self.key.is_empty() && key == self.key {
            return Some(PropValue::text(self.value.clone()));
        }
        self.inner.get_property(key)
    }

    fn node_equals(&self, other: &dyn GamePiece) -> bool {
        match other.as_any().downcast_ref::<Marker>() {
            Some(o) => self.key == o.key && self.value == o.value,
            None => false,
        }
    }

    fn description(&self) -> String {
        format!("Marker - {} = {}", self.key, self.value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
