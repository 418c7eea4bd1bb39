//! Rebuilds values as plain JSON trees before they leave the process.

use serde_json::{Map, Value};
use sheetline_parser::wrapper::{unwrap_wrappers, MAX_WRAPPER_DEPTH};
use thiserror::Error;

use crate::types::TimelineDocument;

#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("value at {path} is nested in more than {max} data envelopes")]
    WrapperDepthExceeded { path: String, max: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Deep copy of `value` made only of maps, arrays and primitives, with data
/// envelopes removed. Order and length of arrays and key order of maps are kept.
pub fn to_plain_value(value: &Value) -> Result<Value, SanitizeError> {
    plain_at(value, "$")
}

fn plain_at(value: &Value, path: &str) -> Result<Value, SanitizeError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| plain_at(item, &format!("{path}[{index}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(_) => {
            let (inner, _) =
                unwrap_wrappers(value).map_err(|_| SanitizeError::WrapperDepthExceeded {
                    path: path.to_string(),
                    max: MAX_WRAPPER_DEPTH,
                })?;
            match inner {
                Value::Object(map) => {
                    let mut plain = Map::with_capacity(map.len());
                    for (key, field) in map {
                        plain.insert(key.clone(), plain_at(field, &format!("{path}.{key}"))?);
                    }
                    Ok(Value::Object(plain))
                }
                other => plain_at(other, path),
            }
        }
        primitive => Ok(primitive.clone()),
    }
}

/// The document as a plain JSON tree, ready to embed or write out.
pub fn sanitize_document(document: &TimelineDocument) -> Result<Value, SanitizeError> {
    let value = serde_json::to_value(document)?;
    to_plain_value(&value)
}
