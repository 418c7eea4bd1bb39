use tracing::debug;

use crate::errors::ParserError;
use crate::model::{CellValue, Column, SpreadsheetRow};

/// Maps physical column positions onto recognised [`Column`]s.
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderMap {
    slots: Vec<Option<Column>>,
}

impl HeaderMap {
    pub fn from_headers<I, S>(decoder: &'static str, headers: I) -> Result<Self, ParserError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = Vec::new();
        let mut seen: Vec<Column> = Vec::new();

        for (position, header) in headers.into_iter().enumerate() {
            let header = header.as_ref();
            let column = Column::from_header(header);
            match column {
                Some(column) if seen.contains(&column) => {
                    debug!(decoder, position, header, "ignoring duplicate header");
                    slots.push(None);
                }
                Some(column) => {
                    seen.push(column);
                    slots.push(Some(column));
                }
                None => {
                    if !header.trim().is_empty() {
                        debug!(decoder, position, header, "ignoring unrecognised header");
                    }
                    slots.push(None);
                }
            }
        }

        if seen.is_empty() {
            return Err(ParserError::InvalidHeader {
                decoder,
                message: format!(
                    "no recognised column; expected any of {}",
                    Column::ALL
                        .iter()
                        .map(Column::header)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            });
        }

        Ok(Self { slots })
    }

    pub fn columns(&self) -> Vec<Column> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Builds a row from positional cells, returning `None` for a fully blank row.
    /// Cells beyond the header width are dropped.
    pub fn assemble_row<I>(&self, index: usize, cells: I) -> Option<SpreadsheetRow>
    where
        I: IntoIterator<Item = CellValue>,
    {
        let mut row = SpreadsheetRow::new(index);
        for (slot, value) in self.slots.iter().zip(cells) {
            if let Some(column) = slot {
                if !value.is_blank() {
                    row.set(*column, value);
                }
            }
        }

        if row.is_blank() {
            debug!(row_index = index, "skipping blank row");
            None
        } else {
            Some(row)
        }
    }
}
