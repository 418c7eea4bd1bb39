//! Single-key `{"data": ...}` envelopes.
//!
//! Row sources that pass cells through a JS-style data layer sometimes hand back a
//! value boxed in one `data` envelope. Only that exact shape is unwrapped, and only
//! up to [`MAX_WRAPPER_DEPTH`] layers; the decoders in this crate never emit more
//! than one.

use serde_json::Value;

pub const WRAPPER_KEY: &str = "data";

pub const MAX_WRAPPER_DEPTH: usize = 4;

/// Removes exactly one wrapper layer, or returns `None` if `value` is not a wrapper.
pub fn unwrap_layer(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) if map.len() == 1 => map.get(WRAPPER_KEY),
        _ => None,
    }
}

/// Peels wrapper layers until a non-wrapper value remains.
///
/// Returns the inner value and the number of layers removed, or `Err(depth)` once
/// more than [`MAX_WRAPPER_DEPTH`] layers have been seen.
pub fn unwrap_wrappers(value: &Value) -> Result<(&Value, usize), usize> {
    let mut current = value;
    let mut depth = 0;
    while let Some(inner) = unwrap_layer(current) {
        depth += 1;
        if depth > MAX_WRAPPER_DEPTH {
            return Err(depth);
        }
        current = inner;
    }
    Ok((current, depth))
}
