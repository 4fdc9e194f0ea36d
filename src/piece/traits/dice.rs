//! Trait that carries the most recent dice roll made for a piece
//!
//! Configuration fixes the roll (dice count, sides, modifier) and the name of
//! the property the result is published under. State is the list of rolled
//! values; roll completions replace it via the normal state-string path so
//! every replica of the chain applies the identical mutation.

use crate::codec::{SequenceDecoder, SequenceEncoder};
use crate::core::types::{Point, Rect};
use crate::piece::properties::PropValue;
use crate::piece::{GamePiece, TRAIT_DELIMITER};
use crate::render::Canvas;
use crate::roll::RollSpec;
use std::any::Any;

pub const TAG: &str = "roll";

pub struct DiceResult {
    property_name: String,
    description: String,
    n_dice: u32,
    n_sides: u32,
    plus: i64,
    report_total: bool,
    results: Vec<i64>,
    inner: Box<dyn GamePiece>,
}

impl DiceResult {
    pub fn decode(type_str: &str, inner: Box<dyn GamePiece>) -> Self {
        let mut d = SequenceDecoder::new(type_str, TRAIT_DELIMITER);
        d.next_token(); // kind tag
        Self {
            property_name: d.next_str(""),
            description: d.next_str(""),
            n_dice: d.next_int(1).clamp(1, 100) as u32,
            n_sides: d.next_int(6).clamp(2, 10_000) as u32,
            plus: d.next_int(0),
            report_total: d.next_bool(false),
            results: Vec::new(),
            inner,
        }
    }

    /// Encode a result list in the state-string form this trait reads back
    pub fn encode_results(results: &[i64]) -> String {
        let mut e = SequenceEncoder::new(TRAIT_DELIMITER);
        for v in results {
            e = e.append_int(*v);
        }
        e.value()
    }

    /// The roll this trait is configured to request
    pub fn roll_spec(&self) -> RollSpec {
        RollSpec {
            description: self.description.clone(),
            n_dice: self.n_dice,
            n_sides: self.n_sides,
            plus: self.plus,
            report_total: self.report_total,
        }
    }

    pub fn results(&self) -> &[i64] {
        &self.results
    }

    pub fn total(&self) -> i64 {
        self.results.iter().sum()
    }
}

impl GamePiece for DiceResult {
    fn kind(&self) -> &str {
        TAG
    }

    fn my_type(&self) -> String {
        SequenceEncoder::new(TRAIT_DELIMITER)
            .append(TAG)
            .append(&self.property_name)
            .append(&self.description)
            .append_int(self.n_dice as i64)
            .append_int(self.n_sides as i64)
            .append_int(self.plus)
            .append_bool(self.report_total)
            .value()
    }

    fn my_state(&self) -> String {
        Self::encode_results(&self.results)
    }

    fn my_set_state(&mut self, state: &str) {
        self.results.clear();
        if state.is_empty() {
            return;
        }
        let mut d = SequenceDecoder::new(state, TRAIT_DELIMITER);
        while let Some(token) = d.next_token() {
            // Malformed values are dropped rather than poisoning the list
            match token.trim().parse() {
                Ok(v) => self.results.push(v),
                Err(_) => tracing::debug!(%token, "ignoring unparseable roll result"),
            }
        }
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
        // Absent until the first roll lands
        if !self.property_name.is_empty() && key == self.property_name && !self.results.is_empty() {
            return Some(PropValue::Int(self.total()));
        }
        self.inner.get_property(key)
    }

    fn node_equals(&self, other: &dyn GamePiece) -> bool {
        match other.as_any().downcast_ref::<DiceResult>() {
            Some(o) => {
                self.property_name == o.property_name
                    && self.n_dice == o.n_dice
                    && self.n_sides == o.n_sides
                    && self.plus == o.plus
                    && self.report_total == o.report_total
            }
            None => false,
        }
    }

    fn description(&self) -> String {
        format!(
            "Dice Result - {}d{}{}",
            self.n_dice,
            self.n_sides,
            if self.plus != 0 {
                format!("{:+}", self.plus)
            } else {
                String::new()
            }
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::BasePiece;

    fn dice(type_str: &str) -> DiceResult {
        DiceResult::decode(type_str, Box::new(BasePiece::default()))
    }

    #[test]
    fn test_decode_defaults() {
        let d = dice("roll;");
        assert_eq!(d.n_dice, 1);
        assert_eq!(d.n_sides, 6);
        assert_eq!(d.plus, 0);
        assert!(!d.report_total);
        assert!(d.results().is_empty());
    }

    #[test]
    fn test_state_round_trip_exact() {
        let mut d = dice("roll;Fire;attack;2;6;0;true");
        d.my_set_state("4;5");
        assert_eq!(d.results(), &[4, 5]);
        assert_eq!(d.my_state(), "4;5");
    }

    #[test]
    fn test_malformed_state_values_dropped() {
        let mut d = dice("roll;Fire;attack;2;6;0;true");
        d.my_set_state("4;banana;5");
        assert_eq!(d.results(), &[4, 5]);
    }

    #[test]
    fn test_property_absent_before_first_roll() {
        let mut d = dice("roll;Fire;attack;2;6;0;true");
        assert_eq!(d.get_property("Fire"), None);
        d.my_set_state("4;5");
        assert_eq!(d.get_property("Fire"), Some(PropValue::Int(9)));
    }

    #[test]
    fn test_set_state_leaves_config_untouched() {
        let mut d = dice("roll;Fire;attack;2;6;0;true");
        let type_before = d.my_type();
        d.my_set_state("1;2");
        assert_eq!(d.my_type(), type_before);
    }

    #[test]
    fn test_equality_excludes_state_and_description() {
        let mut a = dice("roll;Fire;first;2;6;0;true");
        let b = dice("roll;Fire;second;2;6;0;true");
        a.my_set_state("3;3");
        assert!(a.node_equals(&b));

        let c = dice("roll;Fire;first;3;6;0;true");
        assert!(!a.node_equals(&c));
    }
}
