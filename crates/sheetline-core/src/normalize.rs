//! Per-field conversions from loosely typed cells to timeline values.
//!
//! Nothing here fails: a value that cannot be interpreted is reported as absent
//! and the caller decides what absence means.

use chrono::{Datelike, Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use sheetline_parser::wrapper::unwrap_wrappers;
use sheetline_parser::CellValue;

use crate::types::{DateParts, TimeOfDay};

/// Numbers in this range are read as literal years rather than date serials.
pub const LITERAL_YEAR_RANGE: std::ops::RangeInclusive<f64> = 1000.0..=9999.0;

/// Serial of 9999-12-31 in the 1900 date system.
pub const MAX_DATE_SERIAL: f64 = 2_958_465.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

static FOUR_DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{4})(?:[^0-9]|$)").expect("valid year pattern"));

static YOUTUBE_ALTERNATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i:(?:https?://)?(?:www\.|m\.)?(?:youtu\.be/|youtube(?:-nocookie)?\.com/(?:embed|shorts|live|v)/))([A-Za-z0-9_-]+)/?(?:\?(.*))?$",
    )
    .expect("valid youtube pattern")
});

static VIMEO_PLAYER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:(?:https?://)?player\.vimeo\.com/video/)([0-9]+)/?(?:[?#].*)?$")
        .expect("valid vimeo pattern")
});

/// Year carried by a cell, if any.
///
/// Numbers between 1000 and 9999 are years; other positive numbers are spreadsheet
/// date serials. Text only ever yields its first standalone run of four digits, so
/// `"0999"` is 999 and `"500"` or `"12345"` carry no year. The result is not checked
/// for positivity here.
pub fn extract_year(value: &CellValue) -> Option<i64> {
    match value {
        CellValue::Empty => None,
        CellValue::Number(n) => year_from_number(*n),
        CellValue::Text(text) => year_from_text(text),
    }
}

fn year_from_number(n: f64) -> Option<i64> {
    if !n.is_finite() || n < 1.0 {
        return None;
    }
    if LITERAL_YEAR_RANGE.contains(&n) {
        return Some(n.trunc() as i64);
    }
    excel_serial_to_date(n).map(|date| i64::from(date.year()))
}

fn year_from_text(text: &str) -> Option<i64> {
    FOUR_DIGIT_RUN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Calendar date of a 1900-system serial. Serials below 61 count from 1899-12-31 so
/// the phantom 1900-02-29 does not shift January and February 1900.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_DATE_SERIAL {
        return None;
    }
    let days = serial.trunc() as u64;
    let epoch = if days < 61 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    epoch.checked_add_days(Days::new(days))
}

/// Month/day coercion. Zero, blank, and non-integral values are absent;
/// out-of-calendar values are passed through unchanged.
pub fn coerce_int(value: &CellValue) -> Option<i64> {
    value
        .as_number()
        .filter(|n| *n != 0.0)
        .and_then(integral)
}

fn integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15).then_some(n as i64)
}

/// Time of day from a cell.
///
/// Text is split on `:` into at most hour, minute and second; a component that is
/// not an integer is left out. A fractional number is a spreadsheet time (fraction
/// of a day); a whole number is an hour.
pub fn parse_time(value: &CellValue) -> TimeOfDay {
    match value {
        CellValue::Empty => TimeOfDay::default(),
        CellValue::Number(n) if n.is_finite() && n.fract() != 0.0 => time_from_day_fraction(*n),
        CellValue::Number(n) => TimeOfDay {
            hour: integral(*n),
            ..TimeOfDay::default()
        },
        CellValue::Text(text) => parse_time_text(text),
    }
}

pub fn parse_time_text(text: &str) -> TimeOfDay {
    let mut components = text.split(':').map(parse_time_component);
    TimeOfDay {
        hour: components.next().flatten(),
        minute: components.next().flatten(),
        second: components.next().flatten(),
    }
}

fn parse_time_component(component: &str) -> Option<i64> {
    component.trim().parse::<f64>().ok().and_then(integral)
}

fn time_from_day_fraction(n: f64) -> TimeOfDay {
    let seconds = ((n.fract().abs() * SECONDS_PER_DAY).round() as i64).min(86_399);
    TimeOfDay {
        hour: Some(seconds / 3600),
        minute: Some(seconds % 3600 / 60),
        second: Some(seconds % 60),
    }
}

/// Rewrites short-link and embed-style video URLs to the vendor's watch page.
/// Anything unrecognised comes back unchanged apart from surrounding whitespace.
pub fn normalize_video_url(url: &str) -> String {
    let trimmed = url.trim();

    if let Some(captures) = YOUTUBE_ALTERNATE.captures(trimmed) {
        let id = &captures[1];
        return match captures.get(2).map(|query| query.as_str()) {
            Some(query) if !query.is_empty() => {
                format!("https://www.youtube.com/watch?v={id}&{query}")
            }
            _ => format!("https://www.youtube.com/watch?v={id}"),
        };
    }

    if let Some(captures) = VIMEO_PLAYER.captures(trimmed) {
        return format!("https://vimeo.com/{}", &captures[1]);
    }

    trimmed.to_string()
}

/// Copies the recognised date keys out of an arbitrary JSON value.
///
/// Data envelopes around the object or its fields are removed, unknown keys are
/// dropped, and numeric strings are accepted. Zero is kept (midnight is a real
/// hour). Returns `None` when nothing usable remains.
pub fn clean_date_parts(value: &Value) -> Option<DateParts> {
    let (inner, _) = unwrap_wrappers(value).ok()?;
    let map = inner.as_object()?;
    let field = |key: &str| {
        map.get(key)
            .and_then(|raw| unwrap_wrappers(raw).ok())
            .and_then(|(raw, _)| json_integer(raw))
    };

    DateParts {
        year: field("year"),
        month: field("month"),
        day: field("day"),
        hour: field("hour"),
        minute: field("minute"),
        second: field("second"),
    }
    .cleaned()
}

fn json_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_f64().and_then(integral),
        Value::String(text) => text.trim().parse::<f64>().ok().and_then(integral),
        _ => None,
    }
}
