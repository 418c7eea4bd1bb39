pub mod errors;
pub mod formats;
pub mod model;
mod registry;
pub mod wrapper;

pub use errors::{DecoderAttempt, ParserError};
pub use model::{CellValue, Column, ParsedSheet, SheetFormat, SpreadsheetRow};
pub use registry::{decode_path, decode_sheet, decode_with_decoders, SheetDecoder};

#[cfg(test)]
mod tests;
