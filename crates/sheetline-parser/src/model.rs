use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The spreadsheet columns the timeline conversion reads. Any other header is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Year,
    Month,
    Day,
    Time,
    EndYear,
    EndMonth,
    EndDay,
    EndTime,
    Headline,
    Text,
    Media,
    MediaCredit,
    MediaCaption,
    MediaThumbnail,
    Group,
    Background,
    DisplayDate,
    Type,
}

impl Column {
    pub const ALL: [Column; 18] = [
        Column::Year,
        Column::Month,
        Column::Day,
        Column::Time,
        Column::EndYear,
        Column::EndMonth,
        Column::EndDay,
        Column::EndTime,
        Column::Headline,
        Column::Text,
        Column::Media,
        Column::MediaCredit,
        Column::MediaCaption,
        Column::MediaThumbnail,
        Column::Group,
        Column::Background,
        Column::DisplayDate,
        Column::Type,
    ];

    pub const END_DATE: [Column; 4] = [
        Column::EndYear,
        Column::EndMonth,
        Column::EndDay,
        Column::EndTime,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Year => "Year",
            Column::Month => "Month",
            Column::Day => "Day",
            Column::Time => "Time",
            Column::EndYear => "End Year",
            Column::EndMonth => "End Month",
            Column::EndDay => "End Day",
            Column::EndTime => "End Time",
            Column::Headline => "Headline",
            Column::Text => "Text",
            Column::Media => "Media",
            Column::MediaCredit => "Media Credit",
            Column::MediaCaption => "Media Caption",
            Column::MediaThumbnail => "Media Thumbnail",
            Column::Group => "Group",
            Column::Background => "Background",
            Column::DisplayDate => "Display Date",
            Column::Type => "Type",
        }
    }

    /// Header matching is exact apart from surrounding whitespace.
    pub fn from_header(header: &str) -> Option<Self> {
        let trimmed = header.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.header() == trimmed)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.header())
    }
}

/// A single decoded cell. Decoders never produce any other shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Stringifies the cell the way a spreadsheet displays a general-format value:
    /// whole numbers lose their fractional part.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(text) if text.is_empty() => None,
            CellValue::Text(text) => Some(text.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
        }
    }

    /// Numbers pass through; text is accepted only when it trims to a finite float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => n.is_finite().then_some(*n),
            CellValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text().as_deref().unwrap_or(""))
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Text(text) => serializer.serialize_str(text),
            CellValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

/// One data row of the consumed sheet, keyed by recognised column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpreadsheetRow {
    /// 0-based index among the data rows (the header row is not counted).
    pub index: usize,
    sheet_row: usize,
    cells: BTreeMap<Column, CellValue>,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl SpreadsheetRow {
    /// A row whose header sits on sheet row 1 with nothing skipped above it.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            sheet_row: index + 2,
            cells: BTreeMap::new(),
        }
    }

    /// Records where the row physically sits when the header is lower down or
    /// rows were skipped.
    pub fn at_sheet_row(mut self, sheet_row: usize) -> Self {
        self.sheet_row = sheet_row;
        self
    }

    pub fn with(mut self, column: Column, value: impl Into<CellValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: Column, value: impl Into<CellValue>) {
        self.cells.insert(column, value.into());
    }

    /// Missing columns read as [`CellValue::Empty`].
    pub fn get(&self, column: Column) -> &CellValue {
        self.cells.get(&column).unwrap_or(&EMPTY_CELL)
    }

    /// 1-based row number as shown by a spreadsheet application.
    pub fn sheet_row(&self) -> usize {
        self.sheet_row
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_blank)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Column, &CellValue)> {
        self.cells.iter().map(|(column, value)| (*column, value))
    }
}

impl Serialize for SpreadsheetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column.header(), value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetFormat {
    Workbook,
    JsonRows,
    Delimited,
}

impl SheetFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetFormat::Workbook => "workbook",
            SheetFormat::JsonRows => "json_rows",
            SheetFormat::Delimited => "delimited",
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSheet {
    /// blake3 hex digest of the raw input bytes.
    pub file_hash: String,
    pub format: SheetFormat,
    pub sheet_name: Option<String>,
    /// Sheets present in the workbook but not consumed.
    pub other_sheets: Vec<String>,
    /// Recognised columns in header order.
    pub columns: Vec<Column>,
    pub rows: Vec<SpreadsheetRow>,
}

impl ParsedSheet {
    pub fn new(format: SheetFormat, bytes: &[u8]) -> Self {
        Self {
            file_hash: blake3::hash(bytes).to_hex().to_string(),
            format,
            sheet_name: None,
            other_sheets: Vec::new(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}
