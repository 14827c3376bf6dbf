//! The single numeric value type the engine evaluates.

/// Every node produces a `Value`. Nonzero is truthy.
pub type Value = i64;

/// Result of every soft failure (exhausted stack, argument read with no frame).
pub const DEFAULT_VALUE: Value = 0;

/// Returns `true` when a condition result selects the "then" branch.
#[inline(always)]
pub fn is_truthy(value: Value) -> bool {
    value != 0
}

/// Converts a comparison outcome into `1` or `0`.
#[inline(always)]
pub fn from_bool(value: bool) -> Value {
    Value::from(value)
}
