use std::path::Path;

use serde::Serialize;
use sheetline_parser::{decode_path, decode_sheet, ParsedSheet, SheetFormat, SpreadsheetRow};
use tracing::info;

use crate::assemble::assemble_document;
use crate::builder::{build_events, RowRejection};
use crate::config::TitleConfig;
use crate::error::Result;
use crate::types::TimelineDocument;

/// Counts reported after a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub file_hash: Option<String>,
    pub format: Option<SheetFormat>,
    pub sheet_name: Option<String>,
    pub total_rows: usize,
    pub accepted_events: usize,
    pub rejected_rows: usize,
    pub title_from_sheet: bool,
}

#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: TimelineDocument,
    pub rejections: Vec<RowRejection>,
    pub summary: ConversionSummary,
}

/// Builds and assembles a document from already decoded rows.
pub fn convert_rows(rows: &[SpreadsheetRow], title: &TitleConfig) -> Conversion {
    let outcome = build_events(rows);
    let accepted = outcome.events.len();
    let document = assemble_document(outcome.events, title);
    let title_from_sheet = !document.title.is_placeholder();

    let summary = ConversionSummary {
        file_hash: None,
        format: None,
        sheet_name: None,
        total_rows: rows.len(),
        accepted_events: accepted,
        rejected_rows: outcome.rejections.len(),
        title_from_sheet,
    };

    Conversion {
        document,
        rejections: outcome.rejections,
        summary,
    }
}

pub fn convert_sheet(sheet: &ParsedSheet, title: &TitleConfig) -> Conversion {
    let mut conversion = convert_rows(&sheet.rows, title);
    conversion.summary.file_hash = Some(sheet.file_hash.clone());
    conversion.summary.format = Some(sheet.format);
    conversion.summary.sheet_name = sheet.sheet_name.clone();

    let summary = &conversion.summary;
    info!(
        file_hash = %sheet.file_hash,
        format = %sheet.format,
        total_rows = summary.total_rows,
        accepted_events = summary.accepted_events,
        rejected_rows = summary.rejected_rows,
        title_from_sheet = summary.title_from_sheet,
        "converted sheet to timeline document"
    );
    conversion
}

pub fn convert_bytes(bytes: &[u8], title: &TitleConfig) -> Result<Conversion> {
    let sheet = decode_sheet(bytes)?;
    Ok(convert_sheet(&sheet, title))
}

pub fn convert_path(path: &Path, title: &TitleConfig) -> Result<Conversion> {
    let sheet = decode_path(path)?;
    Ok(convert_sheet(&sheet, title))
}
