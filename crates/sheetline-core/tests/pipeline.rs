use std::path::PathBuf;

use anyhow::Result;
use rust_xlsxwriter::Workbook;
use serde_json::json;
use sheetline_core::{
    build_events, convert_bytes, convert_path, convert_rows, sanitize_document, DateParts,
    RejectReason, TitleConfig, TitleSlide,
};
use sheetline_parser::{Column, SheetFormat, SpreadsheetRow};

fn parser_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../sheetline-parser/tests/data")
        .join(name)
}

#[test]
fn one_valid_row_and_one_missing_year() {
    let rows = vec![
        SpreadsheetRow::new(0)
            .with(Column::Year, 1969)
            .with(Column::Headline, "Moon Landing")
            .with(Column::Text, "Apollo 11"),
        SpreadsheetRow::new(1)
            .with(Column::Year, "")
            .with(Column::Headline, "Bad Row"),
    ];

    let conversion = convert_rows(&rows, &TitleConfig::default());

    assert_eq!(conversion.document.events.len(), 1);
    assert_eq!(conversion.rejections.len(), 1);
    assert_eq!(conversion.rejections[0].reason, RejectReason::MissingStartYear);
    assert_eq!(conversion.rejections[0].sheet_row, 3);
    assert_eq!(
        sanitize_document(&conversion.document).unwrap()["events"][0],
        json!({
            "start_date": {"year": 1969},
            "text": {"headline": "Moon Landing", "text": "Apollo 11"}
        })
    );
    assert_eq!(
        conversion.document.title,
        TitleSlide::placeholder("Timeline", "Generated from Excel")
    );
}

#[test]
fn end_date_present_only_with_non_blank_end_cells() {
    let rows = vec![
        SpreadsheetRow::new(0).with(Column::Year, 1969),
        SpreadsheetRow::new(1)
            .with(Column::Year, 1969)
            .with(Column::EndYear, 1972),
        SpreadsheetRow::new(2)
            .with(Column::Year, 1969)
            .with(Column::EndMonth, "n/a"),
        SpreadsheetRow::new(3)
            .with(Column::Year, 1969)
            .with(Column::EndTime, "14:30"),
    ];

    let events = build_events(&rows).events;

    assert_eq!(events[0].end_date, None);
    assert_eq!(events[1].end_date, Some(DateParts::year(1972)));
    // Non-blank but unreadable: nothing left to emit.
    assert_eq!(events[2].end_date, None);
    assert_eq!(
        events[3].end_date,
        Some(DateParts {
            hour: Some(14),
            minute: Some(30),
            ..DateParts::default()
        })
    );
}

#[test]
fn every_accepted_event_has_a_positive_year() {
    let years = ["1969", "-44", "year 0000", "0", "abc", "25569", "c. 1492", ""];
    let rows: Vec<_> = years
        .iter()
        .enumerate()
        .map(|(index, year)| SpreadsheetRow::new(index).with(Column::Year, *year))
        .collect();

    let outcome = build_events(&rows);

    assert_eq!(outcome.events.len() + outcome.rejections.len(), rows.len());
    assert!(outcome.events.iter().all(|event| event.start_date.has_valid_year()));
    assert!(outcome
        .rejections
        .iter()
        .any(|rejection| rejection.reason == RejectReason::NonPositiveStartYear(0)));
}

#[test]
fn csv_fixture_converts_with_rejections() -> Result<()> {
    let conversion = convert_path(&parser_fixture("events.csv"), &TitleConfig::default())?;
    let summary = &conversion.summary;

    assert_eq!(summary.format, Some(SheetFormat::Delimited));
    assert_eq!(summary.total_rows, 4);
    assert_eq!(summary.accepted_events, 2);
    assert_eq!(summary.rejected_rows, 2);
    // The title row has no Year, so it is rejected like any other row.
    assert!(!summary.title_from_sheet);

    let doc = sanitize_document(&conversion.document)?;
    assert_eq!(
        doc["events"][0],
        json!({
            "start_date": {"year": 1957, "month": 10, "day": 4, "hour": 19, "minute": 28},
            "text": {"headline": "Sputnik 1", "text": "First artificial satellite"},
            "media": {
                "url": "https://www.youtube.com/watch?v=abc123",
                "credit": "NASA",
                "caption": "Launch",
                "thumbnail": ""
            },
            "group": "Soviet",
            "background": {"color": "#222222"}
        })
    );
    assert_eq!(
        doc["events"][1]["end_date"],
        json!({"year": 1969, "month": 7, "day": 21})
    );
    assert_eq!(doc["events"][1]["display_date"], "July 20, 1969");
    Ok(())
}

#[test]
fn workbook_title_row_becomes_title_slide() -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Year", "Headline", "Text", "Type"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    sheet.write_number(1, 0, 1957.0)?;
    sheet.write_string(1, 1, "Space Race")?;
    sheet.write_string(1, 2, "A short history")?;
    sheet.write_string(1, 3, "title")?;
    sheet.write_number(2, 0, 1969.0)?;
    sheet.write_string(2, 1, "Moon Landing")?;
    sheet.write_number(3, 0, 1961.0)?;
    sheet.write_string(3, 1, "Gagarin")?;
    let bytes = workbook.save_to_buffer()?;

    let conversion = convert_bytes(&bytes, &TitleConfig::default())?;

    assert!(conversion.summary.title_from_sheet);
    assert_eq!(conversion.document.title.text().headline, "Space Race");
    let headlines: Vec<_> = conversion
        .document
        .events
        .iter()
        .map(|event| event.text.headline.as_str())
        .collect();
    // Row order, not chronological order.
    assert_eq!(headlines, vec!["Moon Landing", "Gagarin"]);
    Ok(())
}

#[test]
fn configured_placeholder_title_is_used() {
    let title = TitleConfig {
        headline: "Space Race".to_string(),
        text: "1957-1975".to_string(),
    };
    let conversion = convert_rows(&[SpreadsheetRow::new(0).with(Column::Year, 1969)], &title);
    assert_eq!(
        conversion.document.title,
        TitleSlide::placeholder("Space Race", "1957-1975")
    );
}
