use std::fmt;

use sheetline_parser::{Column, SpreadsheetRow};
use thiserror::Error;
use tracing::warn;

use crate::normalize::{coerce_int, extract_year, normalize_video_url, parse_time};
use crate::types::{Background, DateParts, EventText, MediaRef, TimelineEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("no start year could be read from the Year column")]
    MissingStartYear,
    #[error("start year {0} is not a positive year")]
    NonPositiveStartYear(i64),
}

/// A row that failed validation, kept with its raw cells for diagnostics.
#[derive(Debug, Clone)]
pub struct RowRejection {
    pub row_index: usize,
    pub sheet_row: usize,
    pub reason: RejectReason,
    pub row: SpreadsheetRow,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} (data row {}): {}", self.sheet_row, self.row_index, self.reason)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub events: Vec<TimelineEvent>,
    pub rejections: Vec<RowRejection>,
}

/// Builds one event from a row. The only hard requirement is a positive start year.
pub fn build_event(row: &SpreadsheetRow) -> Result<TimelineEvent, RowRejection> {
    let start_year = extract_year(row.get(Column::Year));
    let reject = |reason| RowRejection {
        row_index: row.index,
        sheet_row: row.sheet_row(),
        reason,
        row: row.clone(),
    };
    match start_year {
        None => return Err(reject(RejectReason::MissingStartYear)),
        Some(year) if year <= 0 => return Err(reject(RejectReason::NonPositiveStartYear(year))),
        Some(_) => {}
    }

    let start_date = date_parts(row, Column::Year, Column::Month, Column::Day, Column::Time);
    let end_date = Column::END_DATE
        .iter()
        .any(|column| !row.get(*column).is_blank())
        .then(|| {
            date_parts(
                row,
                Column::EndYear,
                Column::EndMonth,
                Column::EndDay,
                Column::EndTime,
            )
        })
        .and_then(DateParts::cleaned);

    let media = text_of(row, Column::Media)
        .filter(|url| !url.trim().is_empty())
        .map(|url| MediaRef {
            url: normalize_video_url(&url),
            credit: text_of(row, Column::MediaCredit).unwrap_or_default(),
            caption: text_of(row, Column::MediaCaption).unwrap_or_default(),
            thumbnail: text_of(row, Column::MediaThumbnail).unwrap_or_default(),
        });

    let event = TimelineEvent {
        start_date,
        end_date,
        text: EventText {
            headline: text_of(row, Column::Headline).unwrap_or_default(),
            text: text_of(row, Column::Text).unwrap_or_default(),
        },
        media,
        group: text_of(row, Column::Group),
        background: text_of(row, Column::Background).map(|color| Background { color }),
        display_date: text_of(row, Column::DisplayDate),
        event_type: text_of(row, Column::Type),
    };

    debug_assert!(event.start_date.has_valid_year());
    Ok(event)
}

/// Builds every row in order. Rejected rows are logged and collected; they never
/// stop the batch.
pub fn build_events(rows: &[SpreadsheetRow]) -> BuildOutcome {
    let mut outcome = BuildOutcome {
        events: Vec::with_capacity(rows.len()),
        rejections: Vec::new(),
    };

    for row in rows {
        match build_event(row) {
            Ok(event) => outcome.events.push(event),
            Err(rejection) => {
                let raw = serde_json::to_string(&rejection.row).unwrap_or_default();
                warn!(
                    row_index = rejection.row_index,
                    sheet_row = rejection.sheet_row,
                    reason = %rejection.reason,
                    row = %raw,
                    "rejected spreadsheet row"
                );
                outcome.rejections.push(rejection);
            }
        }
    }

    outcome
}

fn date_parts(
    row: &SpreadsheetRow,
    year: Column,
    month: Column,
    day: Column,
    time: Column,
) -> DateParts {
    DateParts {
        year: extract_year(row.get(year)).filter(|year| *year > 0),
        month: coerce_int(row.get(month)),
        day: coerce_int(row.get(day)),
        ..DateParts::default()
    }
    .with_time(parse_time(row.get(time)))
}

fn text_of(row: &SpreadsheetRow, column: Column) -> Option<String> {
    row.get(column).as_text()
}
