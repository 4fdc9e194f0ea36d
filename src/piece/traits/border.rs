//! Trait that draws a colored border around a piece
//!
//! The border can be gated on a named property: when a property name is
//! configured, the border only draws while that property resolves truthy
//! against the whole chain. An empty property name means always on.

use crate::codec::{SequenceDecoder, SequenceEncoder};
use crate::core::types::{Point, Rect};
use crate::piece::properties::{self, PropValue};
use crate::piece::{GamePiece, TRAIT_DELIMITER};
use crate::render::colors::Color;
use crate::render::Canvas;
use std::any::Any;

pub const TAG: &str = "border";

pub struct BorderOutline {
    property_name: String,
    description: String,
    thickness: i32,
    color: Color,
    inner: Box<dyn GamePiece>,
}

impl BorderOutline {
    /// Decode from a type string; any missing field takes its default
    /// (no gate, empty description, thickness 2, red)
    pub fn decode(type_str: &str, inner: Box<dyn GamePiece>) -> Self {
        let mut d = SequenceDecoder::new(type_str, TRAIT_DELIMITER);
        d.next_token(); // kind tag
        Self {
            property_name: d.next_str(""),
            description: d.next_str(""),
            thickness: d.next_int(2) as i32,
            color: d.next_color(Color::RED),
            inner,
        }
    }

    /// Whether the configured gate allows drawing, resolved against the
    /// outermost node of the chain
    fn gate_open(&self, root: &dyn GamePiece) -> bool {
        if self.property_name.is_empty() {
            return true;
        }
        properties::is_truthy(root.get_property(&self.property_name).as_ref())
    }
}

impl GamePiece for BorderOutline {
    fn kind(&self) -> &str {
        TAG
    }

    fn my_type(&self) -> String {
        SequenceEncoder::new(TRAIT_DELIMITER)
            .append(TAG)
            .append(&self.property_name)
            .append(&self.description)
            .append_int(self.thickness as i64)
            .append_color(self.color)
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
        let inner_box = self.inner.bounding_box();
        inner_box.union(&inner_box.grown(self.thickness))
    }

    fn draw(&self, canvas: &mut dyn Canvas, pos: Point, zoom: f64, root: &dyn GamePiece) {
        self.inner.draw(canvas, pos, zoom, root);

        if !self.gate_open(root) {
            return;
        }
        let outline = self
            .inner
            .bounding_box()
            .grown(self.thickness)
            .scaled(zoom)
            .translated(pos);
        let thickness = ((self.thickness as f64 * zoom) as i32).max(1);
        canvas.stroke_rect(outline, self.color, thickness);
    }

    fn get_property(&self, key: &str) -> Option<PropValue> {
        self.inner.get_property(key)
    }

    fn node_equals(&self, other: &dyn GamePiece) -> bool {
        // Description is cosmetic, not identity
        match other.as_any().downcast_ref::<BorderOutline>() {
            Some(o) => {
                self.color == o.color
                    && self.property_name == o.property_name
                    && self.thickness == o.thickness
            }
            None => false,
        }
    }

    fn description(&self) -> String {
        if self.description.is_empty() {
            "Border Outline".to_string()
        } else {
            format!("Border Outline - {}", self.description)
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
