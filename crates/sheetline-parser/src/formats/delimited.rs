use csv::ReaderBuilder;

use super::common::HeaderMap;
use crate::errors::ParserError;
use crate::model::{CellValue, ParsedSheet, SheetFormat};
use crate::registry::SheetDecoder;

const DECODER_NAME: &str = "delimited";
const UTF8_BOM: char = '\u{feff}';

/// Comma- or tab-separated text with a header row. Every cell is read as text;
/// numeric interpretation happens during normalization.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedDecoder {
    delimiter: u8,
}

impl DelimitedDecoder {
    pub fn csv() -> Self {
        Self { delimiter: b',' }
    }

    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl Default for DelimitedDecoder {
    fn default() -> Self {
        Self::csv()
    }
}

impl SheetDecoder for DelimitedDecoder {
    fn name(&self) -> &'static str {
        DECODER_NAME
    }

    fn decode(&self, bytes: &[u8]) -> Result<ParsedSheet, ParserError> {
        let content = std::str::from_utf8(bytes).map_err(|err| ParserError::FormatMismatch {
            decoder: DECODER_NAME,
            reason: format!("input is not UTF-8 text: {err}"),
        })?;
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(content.as_bytes());

        let mut parsed = ParsedSheet::new(SheetFormat::Delimited, bytes);
        let mut headers: Option<HeaderMap> = None;
        let mut index = 0;

        for record in reader.records() {
            let record = record.map_err(|source| ParserError::Csv {
                decoder: DECODER_NAME,
                source,
            })?;

            let Some(header_map) = headers.as_ref() else {
                if record.iter().all(|field| field.trim().is_empty()) {
                    continue;
                }
                let header_map = HeaderMap::from_headers(DECODER_NAME, record.iter())?;
                parsed.columns = header_map.columns();
                headers = Some(header_map);
                continue;
            };

            let cells = record.iter().map(|field| CellValue::Text(field.to_string()));
            if let Some(row) = header_map.assemble_row(index, cells) {
                let row = match record.position() {
                    Some(position) => row.at_sheet_row(position.line() as usize),
                    None => row,
                };
                parsed.rows.push(row);
            }
            index += 1;
        }

        Ok(parsed)
    }
}
