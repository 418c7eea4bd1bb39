use serde_json::Value;
use tracing::warn;

use super::common::HeaderMap;
use crate::errors::ParserError;
use crate::model::{CellValue, Column, ParsedSheet, SheetFormat, SpreadsheetRow};
use crate::registry::SheetDecoder;
use crate::wrapper::unwrap_wrappers;

const DECODER_NAME: &str = "json_rows";

/// A JSON array of row objects keyed by header, as produced by spreadsheet-to-JSON
/// exporters. Cells may be boxed in a single-key `{"data": ...}` envelope.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRowsDecoder;

impl SheetDecoder for JsonRowsDecoder {
    fn name(&self) -> &'static str {
        DECODER_NAME
    }

    fn decode(&self, bytes: &[u8]) -> Result<ParsedSheet, ParserError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|err| ParserError::FormatMismatch {
                decoder: DECODER_NAME,
                reason: format!("not a JSON document: {err}"),
            })?;

        let Value::Array(items) = value else {
            return Err(ParserError::FormatMismatch {
                decoder: DECODER_NAME,
                reason: "expected a JSON array of row objects".to_string(),
            });
        };

        let mut parsed = ParsedSheet::new(SheetFormat::JsonRows, bytes);
        if items.is_empty() {
            return Ok(parsed);
        }

        let mut headers: Vec<String> = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let object = row_object(item, index)?;
            for key in object.keys() {
                if !headers.iter().any(|seen| seen == key) {
                    headers.push(key.clone());
                }
            }
        }
        parsed.columns = HeaderMap::from_headers(DECODER_NAME, &headers)?.columns();

        for (index, item) in items.iter().enumerate() {
            let object = row_object(item, index)?;
            let mut row = SpreadsheetRow::new(index);
            for (key, raw) in object {
                let Some(column) = Column::from_header(key) else {
                    continue;
                };
                let value = cell_value(raw, index, column);
                if !value.is_blank() {
                    row.set(column, value);
                }
            }
            if !row.is_blank() {
                parsed.rows.push(row);
            }
        }

        Ok(parsed)
    }
}

fn row_object(item: &Value, index: usize) -> Result<&serde_json::Map<String, Value>, ParserError> {
    let (inner, _) = unwrap_wrappers(item).map_err(|depth| ParserError::DataRow {
        decoder: DECODER_NAME,
        row_index: index,
        message: format!("row is nested in {depth} data envelopes"),
    })?;
    inner.as_object().ok_or_else(|| ParserError::DataRow {
        decoder: DECODER_NAME,
        row_index: index,
        message: "row is not a JSON object".to_string(),
    })
}

/// A cell that cannot be read as a scalar is logged and treated as blank, so one
/// bad cell never fails the whole sheet.
fn cell_value(raw: &Value, index: usize, column: Column) -> CellValue {
    let inner = match unwrap_wrappers(raw) {
        Ok((inner, _)) => inner,
        Err(depth) => {
            warn!(
                decoder = DECODER_NAME,
                row_index = index,
                column = %column,
                depth,
                "cell nested in too many data envelopes; reading it as blank"
            );
            return CellValue::Empty;
        }
    };

    match inner {
        Value::Null => CellValue::Empty,
        Value::String(text) => CellValue::Text(text.clone()),
        Value::Bool(flag) => CellValue::Text(flag.to_string()),
        Value::Number(number) => number
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or(CellValue::Empty),
        Value::Array(_) | Value::Object(_) => {
            warn!(
                decoder = DECODER_NAME,
                row_index = index,
                column = %column,
                "cell holds a nested value; reading it as blank"
            );
            CellValue::Empty
        }
    }
}
