use std::path::Path;

use sheetline_parser::SpreadsheetRow;

use crate::builder::RowRejection;
use crate::config::SheetlineConfig;
use crate::error::Result;
use crate::export::{render_standalone_html, ExportError};
use crate::pipeline::{convert_path, convert_rows, Conversion};
use crate::types::TimelineDocument;

/// Holds at most one current document. Each load replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct TimelineSession {
    config: SheetlineConfig,
    current: Option<Conversion>,
}

impl TimelineSession {
    pub fn new(config: SheetlineConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &SheetlineConfig {
        &self.config
    }

    pub fn load_rows(&mut self, rows: &[SpreadsheetRow]) -> &TimelineDocument {
        let conversion = convert_rows(rows, &self.config.title);
        &self.current.insert(conversion).document
    }

    /// Decodes and converts `path`. On failure the previous document is kept.
    pub fn load_path(&mut self, path: &Path) -> Result<&TimelineDocument> {
        let conversion = convert_path(path, &self.config.title)?;
        Ok(&self.current.insert(conversion).document)
    }

    pub fn document(&self) -> Option<&TimelineDocument> {
        self.current.as_ref().map(|conversion| &conversion.document)
    }

    pub fn rejections(&self) -> &[RowRejection] {
        self.current
            .as_ref()
            .map(|conversion| conversion.rejections.as_slice())
            .unwrap_or_default()
    }

    /// Standalone page for the current document, or `None` when nothing is loaded.
    pub fn export_html(&self) -> std::result::Result<Option<String>, ExportError> {
        self.document()
            .map(|document| render_standalone_html(document, &self.config.export))
            .transpose()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
