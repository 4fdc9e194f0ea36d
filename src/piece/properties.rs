//! Named property values and chain-wide resolution
//!
//! Properties are resolved from the outermost node inward: the first node
//! that defines a key wins, so outer traits shadow inner ones. Gating logic
//! throughout the engine coerces property values to booleans with one fixed
//! rule, `is_truthy`.

use crate::piece::GamePiece;

/// Value of a named piece property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl PropValue {
    pub fn text(s: impl Into<String>) -> Self {
        PropValue::Text(s.into())
    }
}

impl std::fmt::Display for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropValue::Text(s) => write!(f, "{}", s),
            PropValue::Int(v) => write!(f, "{}", v),
            PropValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// Resolve `key` starting at the outermost node of the chain.
///
/// Total: returns `None` when no node in the chain defines the key.
pub fn get_property(root: &dyn GamePiece, key: &str) -> Option<PropValue> {
    root.get_property(key)
}

/// The engine-wide boolean coercion rule:
/// - absent → false
/// - text `""`, `"false"`, `"0"` → false; any other text → true
/// - booleans are themselves
/// - integer 0 → false; any other integer → true
pub fn is_truthy(value: Option<&PropValue>) -> bool {
    match value {
        None => false,
        Some(PropValue::Text(s)) => !matches!(s.as_str(), "" | "false" | "0"),
        Some(PropValue::Bool(b)) => *b,
        Some(PropValue::Int(v)) => *v != 0,
    }
}
