use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct DecoderAttempt {
    pub decoder: &'static str,
    pub message: String,
}

impl DecoderAttempt {
    pub fn new(decoder: &'static str, message: impl Into<String>) -> Self {
        Self {
            decoder,
            message: message.into(),
        }
    }
}

impl fmt::Display for DecoderAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.decoder, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{decoder} format mismatch: {reason}")]
    FormatMismatch {
        decoder: &'static str,
        reason: String,
    },

    #[error("{decoder} header row invalid: {message}")]
    InvalidHeader {
        decoder: &'static str,
        message: String,
    },

    #[error("{decoder} CSV error: {source}")]
    Csv {
        decoder: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{decoder} data row {row_index} invalid: {message}")]
    DataRow {
        decoder: &'static str,
        row_index: usize,
        message: String,
    },

    #[error("{decoder} workbook error: {message}")]
    Workbook {
        decoder: &'static str,
        message: String,
    },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("no decoder recognized this input; attempts: {attempts:?}")]
    NoMatchingDecoder { attempts: Vec<DecoderAttempt> },
}
