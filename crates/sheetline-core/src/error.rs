use thiserror::Error;

use crate::export::ExportError;
use crate::sanitize::SanitizeError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input decoding failed: {0}")]
    Parser(#[from] sheetline_parser::ParserError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sanitization failed: {0}")]
    Sanitize(#[from] SanitizeError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid timeline document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
