//! Chain construction, traversal, and structural equality
//!
//! A serialized piece is an ordered list of type strings, innermost (the base
//! piece) first. Decoding folds the list bottom-up, each trait taking
//! exclusive ownership of the piece built so far. Unrecognized kind tags wrap
//! transparently instead of failing, so a chain written by a newer revision
//! still decodes.

use crate::codec::kind_tag;
use crate::piece::traits;
use crate::piece::{BasePiece, GamePiece, TRAIT_DELIMITER};

/// Build a chain from type strings ordered innermost first.
///
/// The first entry is decoded as the base piece; each following entry wraps
/// the chain built so far. An empty list yields a default base piece.
pub fn build_chain(type_strings: &[&str]) -> Box<dyn GamePiece> {
    let mut parts = type_strings.iter();
    let base = parts.next().copied().unwrap_or("");
    if !base.is_empty() && kind_tag(base, TRAIT_DELIMITER) != BasePiece::TAG {
        tracing::debug!(tag = %kind_tag(base, TRAIT_DELIMITER), "innermost type string is not a base piece, using defaults");
    }
    let mut piece: Box<dyn GamePiece> = Box::new(BasePiece::decode(base));
    for type_str in parts.copied() {
        piece = traits::wrap(type_str, piece);
    }
    piece
}

/// Iterator over chain nodes, outermost first
pub struct ChainIter<'a> {
    next: Option<&'a dyn GamePiece>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a dyn GamePiece;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.inner();
        Some(current)
    }
}

/// Walk the chain from `root` inward
pub fn nodes(root: &dyn GamePiece) -> ChainIter<'_> {
    ChainIter { next: Some(root) }
}

/// Number of nodes in the chain, base piece included
pub fn node_count(root: &dyn GamePiece) -> usize {
    nodes(root).count()
}

/// Type strings of the whole chain, innermost first, matching the order
/// `build_chain` consumes
pub fn type_strings(root: &dyn GamePiece) -> Vec<String> {
    let mut out: Vec<String> = nodes(root).map(|n| n.my_type()).collect();
    out.reverse();
    out
}

/// State strings of the whole chain, innermost first
pub fn state_strings(root: &dyn GamePiece) -> Vec<String> {
    let mut out: Vec<String> = nodes(root).map(|n| n.my_state()).collect();
    out.reverse();
    out
}

/// Apply a new state string to the node `index` steps in from the outermost
/// node. Returns false when the chain is shorter than that.
///
/// Replicated chains apply the same (index, state) pair on every client to
/// stay in sync.
pub fn apply_state(node: &mut dyn GamePiece, index: usize, state: &str) -> bool {
    if index == 0 {
        node.my_set_state(state);
        return true;
    }
    match node.inner_mut() {
        Some(inner) => apply_state(inner, index - 1, state),
        None => false,
    }
}

/// Index (from the outermost node) of the first node with the given kind tag
pub fn find_kind(root: &dyn GamePiece, kind: &str) -> Option<usize> {
    nodes(root).position(|n| n.kind() == kind)
}

/// Structural equality of two chains: same ordered trait kinds and equal
/// identity configuration at every node. Runtime state and non-identity
/// fields are ignored, so two replicas decoded from equivalent but not
/// byte-identical strings compare equal.
pub fn chains_equal(a: &dyn GamePiece, b: &dyn GamePiece) -> bool {
    let mut left = nodes(a);
    let mut right = nodes(b);
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => {
                if x.kind() != y.kind() || !x.node_equals(y) {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chain() -> Box<dyn GamePiece> {
        build_chain(&[
            "piece;Knight;48;48;0,0,255",
            "mark;Rank;3",
            "border;;;2;255,0,0",
        ])
    }

    #[test]
    fn test_build_chain_order() {
        let chain = sample_chain();
        let kinds: Vec<&str> = nodes(chain.as_ref()).map(|n| n.kind()).collect();
        // Outermost first: last type string is the outermost trait
        assert_eq!(kinds, vec!["border", "mark", "piece"]);
    }

    #[test]
    fn test_type_strings_round_trip() {
        let chain = sample_chain();
        let strings = type_strings(chain.as_ref());
        let rebuilt = build_chain(&strings.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(chains_equal(chain.as_ref(), rebuilt.as_ref()));
    }

    #[test]
    fn test_empty_chain_is_bare_base() {
        let chain = build_chain(&[]);
        assert_eq!(node_count(chain.as_ref()), 1);
        assert_eq!(chain.kind(), "piece");
    }

    #[test]
    fn test_apply_state_targets_one_node() {
        let mut chain = build_chain(&["piece;X;48;48;0,0,0", "roll;Fire;attack;2;6;0;true"]);
        assert!(apply_state(chain.as_mut(), 0, "4;5"));
        assert_eq!(chain.my_state(), "4;5");
        // Past the end of the chain
        assert!(!apply_state(chain.as_mut(), 5, "4;5"));
    }

    #[test]
    fn test_find_kind() {
        let chain = sample_chain();
        assert_eq!(find_kind(chain.as_ref(), "border"), Some(0));
        assert_eq!(find_kind(chain.as_ref(), "mark"), Some(1));
        assert_eq!(find_kind(chain.as_ref(), "piece"), Some(2));
        assert_eq!(find_kind(chain.as_ref(), "roll"), None);
    }

    #[test]
    fn test_unknown_kind_wraps_transparently() {
        let chain = build_chain(&["piece;X;48;48;0,0,0", "hologram;future;fields"]);
        assert_eq!(node_count(chain.as_ref()), 2);
        assert_eq!(chain.name(), "X");
        // Unknown trait re-encodes its raw type string
        assert_eq!(type_strings(chain.as_ref())[1], "hologram;future;fields");
    }

    #[test]
    fn test_chains_equal_ignores_state_and_description() {
        let a = build_chain(&["piece;X;48;48;0,0,0", "border;;old note;2;255,0,0"]);
        let b = build_chain(&["piece;X;48;48;0,0,0", "border;;new note;2;255,0,0"]);
        assert!(chains_equal(a.as_ref(), b.as_ref()));
    }

    #[test]
    fn test_chains_unequal_on_identity_field() {
        let a = build_chain(&["piece;X;48;48;0,0,0", "border;;;2;255,0,0"]);
        let b = build_chain(&["piece;X;48;48;0,0,0", "border;;;3;255,0,0"]);
        assert!(!chains_equal(a.as_ref(), b.as_ref()));
    }

    #[test]
    fn test_chains_unequal_on_order() {
        let a = build_chain(&["piece;X;48;48;0,0,0", "mark;K;1", "border;;;2;255,0,0"]);
        let b = build_chain(&["piece;X;48;48;0,0,0", "border;;;2;255,0,0", "mark;K;1"]);
        assert!(!chains_equal(a.as_ref(), b.as_ref()));
    }

    #[test]
    fn test_equality_stable_across_default_omission() {
        // Fully spelled-out defaults vs. a truncated string that decodes to
        // the same configuration
        let a = build_chain(&["piece;;48;48;128,128,128", "border;;;2;255,0,0"]);
        let b = build_chain(&["piece;", "border;"]);
        assert!(chains_equal(a.as_ref(), b.as_ref()));
        assert!(chains_equal(b.as_ref(), a.as_ref()));
    }
}
