mod common;
mod delimited;
mod json_rows;
mod workbook;

pub use delimited::DelimitedDecoder;
pub use json_rows::JsonRowsDecoder;
pub use workbook::WorkbookDecoder;

pub(crate) use common::HeaderMap;
