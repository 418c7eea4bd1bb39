use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::{debug, info};

use super::common::HeaderMap;
use crate::errors::ParserError;
use crate::model::{CellValue, ParsedSheet, SheetFormat};
use crate::registry::SheetDecoder;

const DECODER_NAME: &str = "workbook";

/// Excel (xlsx, xlsm, xlsb, xls) and OpenDocument spreadsheets.
///
/// Only the first sheet is consumed. Date-formatted cells are surfaced as their
/// serial number (1900 date system) so the year logic sees the same value a
/// general-format cell would hold.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkbookDecoder;

impl SheetDecoder for WorkbookDecoder {
    fn name(&self) -> &'static str {
        DECODER_NAME
    }

    fn decode(&self, bytes: &[u8]) -> Result<ParsedSheet, ParserError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(
            |err| ParserError::FormatMismatch {
                decoder: DECODER_NAME,
                reason: err.to_string(),
            },
        )?;

        let sheet_names = workbook.sheet_names();
        let (first, rest) = sheet_names
            .split_first()
            .ok_or_else(|| ParserError::Workbook {
                decoder: DECODER_NAME,
                message: "workbook contains no sheets".to_string(),
            })?;

        if !rest.is_empty() {
            info!(
                sheet = %first,
                ignored = ?rest,
                "workbook has several sheets; only the first is converted"
            );
        }

        let range = workbook
            .worksheet_range(first)
            .map_err(|err| ParserError::Workbook {
                decoder: DECODER_NAME,
                message: format!("failed to read sheet '{first}': {err}"),
            })?;

        let mut parsed = ParsedSheet::new(SheetFormat::Workbook, bytes);
        parsed.sheet_name = Some(first.clone());
        parsed.other_sheets = rest.to_vec();

        // The range starts at the first used cell, not at A1.
        let first_sheet_row = range.start().map_or(1, |(row, _)| row as usize + 1);
        let mut rows = range
            .rows()
            .enumerate()
            .skip_while(|(_, cells)| cells.iter().all(|cell| cell_value(cell).is_blank()));

        let Some((_, header_cells)) = rows.next() else {
            debug!(sheet = %first, "sheet is empty");
            return Ok(parsed);
        };

        let headers = HeaderMap::from_headers(
            DECODER_NAME,
            header_cells
                .iter()
                .map(|cell| cell_value(cell).as_text().unwrap_or_default()),
        )?;
        parsed.columns = headers.columns();

        parsed.rows = rows
            .enumerate()
            .filter_map(|(index, (offset, cells))| {
                headers
                    .assemble_row(index, cells.iter().map(cell_value))
                    .map(|row| row.at_sheet_row(first_sheet_row + offset))
            })
            .collect();

        debug!(
            sheet = %first,
            rows = parsed.rows.len(),
            "decoded workbook sheet"
        );
        Ok(parsed)
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(flag) => CellValue::Text(flag.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(err) => CellValue::Text(err.to_string()),
    }
}
