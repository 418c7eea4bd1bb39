use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{DecoderAttempt, ParserError};
use crate::formats::{DelimitedDecoder, JsonRowsDecoder, WorkbookDecoder};
use crate::model::ParsedSheet;

pub trait SheetDecoder {
    fn name(&self) -> &'static str;
    fn decode(&self, bytes: &[u8]) -> Result<ParsedSheet, ParserError>;
}

/// Tries every built-in decoder, most specific first.
pub fn decode_sheet(bytes: &[u8]) -> Result<ParsedSheet, ParserError> {
    let workbook = WorkbookDecoder;
    let json_rows = JsonRowsDecoder;
    let delimited = DelimitedDecoder::csv();
    let decoders: [&dyn SheetDecoder; 3] = [&workbook, &json_rows, &delimited];
    decode_with_decoders(bytes, &decoders)
}

pub fn decode_with_decoders(
    bytes: &[u8],
    decoders: &[&dyn SheetDecoder],
) -> Result<ParsedSheet, ParserError> {
    let mut attempts = Vec::new();

    for decoder in decoders {
        match decoder.decode(bytes) {
            Ok(parsed) => {
                debug!(
                    decoder = decoder.name(),
                    rows = parsed.rows.len(),
                    file_hash = %parsed.file_hash,
                    "decoded input"
                );
                return Ok(parsed);
            }
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(DecoderAttempt::new(decoder.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingDecoder { attempts })
}

/// Reads `path` and decodes it, choosing the decoder from the file extension when
/// it is a known one.
pub fn decode_path(path: &Path) -> Result<ParsedSheet, ParserError> {
    let bytes = fs::read(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => WorkbookDecoder.decode(&bytes),
        Some("json") => JsonRowsDecoder.decode(&bytes),
        Some("csv" | "txt") => DelimitedDecoder::csv().decode(&bytes),
        Some("tsv") => DelimitedDecoder::tsv().decode(&bytes),
        _ => decode_sheet(&bytes),
    }
}
