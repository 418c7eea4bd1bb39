use std::fs;
use std::path::PathBuf;

use rust_xlsxwriter::Workbook;

use crate::errors::ParserError;
use crate::formats::{DelimitedDecoder, JsonRowsDecoder, WorkbookDecoder};
use crate::model::{CellValue, Column, SheetFormat};
use crate::registry::SheetDecoder;
use crate::{decode_path, decode_sheet};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn fixture(name: &str) -> Vec<u8> {
    let path = fixture_path(name);
    fs::read(&path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", path.display(), err))
}

fn sample_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Events").unwrap();
    for (col, header) in ["Year", "Month", "Headline", "Media", "Type"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_number(1, 0, 1969.0).unwrap();
    sheet.write_number(1, 1, 7.0).unwrap();
    sheet.write_string(1, 2, "Moon Landing").unwrap();
    sheet.write_string(1, 3, "https://youtu.be/abc123").unwrap();
    sheet.write_number(3, 0, 25569.0).unwrap();
    sheet.write_string(3, 2, "Unix epoch").unwrap();
    sheet.write_boolean(3, 4, true).unwrap();

    let other = workbook.add_worksheet();
    other.set_name("Notes").unwrap();
    other.write_string(0, 0, "ignored").unwrap();

    workbook.save_to_buffer().expect("workbook should serialize")
}

#[test]
fn decodes_first_sheet_of_workbook() {
    let bytes = sample_workbook();
    let parsed = WorkbookDecoder.decode(&bytes).expect("workbook decode failed");

    assert_eq!(parsed.format, SheetFormat::Workbook);
    assert_eq!(parsed.sheet_name.as_deref(), Some("Events"));
    assert_eq!(parsed.other_sheets, vec!["Notes".to_string()]);
    assert_eq!(
        parsed.columns,
        vec![
            Column::Year,
            Column::Month,
            Column::Headline,
            Column::Media,
            Column::Type
        ]
    );
    assert_eq!(parsed.rows.len(), 2, "blank sheet row must be skipped");

    let first = &parsed.rows[0];
    assert_eq!(first.index, 0);
    assert_eq!(first.get(Column::Year).as_number(), Some(1969.0));
    assert_eq!(first.get(Column::Month).as_number(), Some(7.0));
    assert_eq!(first.get(Column::Headline), &CellValue::from("Moon Landing"));
    assert_eq!(first.get(Column::Type), &CellValue::Empty);

    let second = &parsed.rows[1];
    assert_eq!(second.index, 2);
    assert_eq!(second.sheet_row(), 4);
    assert_eq!(second.get(Column::Year).as_number(), Some(25569.0));
    assert_eq!(second.get(Column::Type), &CellValue::from("true"));
}

#[test]
fn workbook_rows_report_their_sheet_row_below_a_lowered_header() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(2, 1, "Year").unwrap();
    sheet.write_string(2, 2, "Headline").unwrap();
    sheet.write_string(3, 2, "No year").unwrap();
    sheet.write_number(5, 1, 1969.0).unwrap();
    sheet.write_string(5, 2, "Moon Landing").unwrap();
    let bytes = workbook.save_to_buffer().expect("workbook should serialize");

    let parsed = WorkbookDecoder.decode(&bytes).expect("workbook decode failed");

    assert_eq!(parsed.columns, vec![Column::Year, Column::Headline]);
    let positions: Vec<(usize, usize)> = parsed
        .rows
        .iter()
        .map(|row| (row.index, row.sheet_row()))
        .collect();
    assert_eq!(positions, vec![(0, 4), (2, 6)]);
}

#[test]
fn csv_rows_report_their_line_after_leading_blank_lines() {
    let parsed = DelimitedDecoder::csv()
        .decode(b"\n,\nYear,Headline\n,\n1969,Moon Landing\n")
        .expect("csv decode failed");

    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].index, 1);
    assert_eq!(parsed.rows[0].sheet_row(), 5);
}

#[test]
fn registry_detects_workbook_bytes() {
    let parsed = decode_sheet(&sample_workbook()).expect("registry decode failed");
    assert_eq!(parsed.format, SheetFormat::Workbook);
    assert_eq!(parsed.file_hash.len(), 64);
}

#[test]
fn decodes_csv_with_blank_rows_and_quoted_fields() {
    let parsed = DelimitedDecoder::csv()
        .decode(&fixture("events.csv"))
        .expect("csv decode failed");

    assert_eq!(parsed.format, SheetFormat::Delimited);
    assert_eq!(parsed.columns.len(), Column::ALL.len());
    assert_eq!(parsed.rows.len(), 4);

    let indexes: Vec<usize> = parsed.rows.iter().map(|row| row.index).collect();
    assert_eq!(indexes, vec![0, 1, 3, 4]);
    let sheet_rows: Vec<usize> = parsed.rows.iter().map(|row| row.sheet_row()).collect();
    assert_eq!(sheet_rows, vec![2, 3, 5, 6]);

    let moon = &parsed.rows[2];
    assert_eq!(moon.get(Column::Year), &CellValue::from("1969"));
    assert_eq!(moon.get(Column::Time), &CellValue::from("20:17:40"));
    assert_eq!(moon.get(Column::DisplayDate), &CellValue::from("July 20, 1969"));
    assert!(moon.get(Column::EndTime).is_blank());
}

#[test]
fn decode_path_picks_tab_delimiter_from_extension() {
    let parsed = decode_path(&fixture_path("events.tsv")).expect("tsv decode failed");
    assert_eq!(parsed.columns, vec![Column::Year, Column::Headline]);
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(
        parsed.rows[0].get(Column::Headline),
        &CellValue::from("Fall of the Wall")
    );
}

#[test]
fn decodes_json_rows_and_unwraps_data_envelopes() {
    let parsed = JsonRowsDecoder
        .decode(&fixture("events.json"))
        .expect("json decode failed");

    assert_eq!(parsed.format, SheetFormat::JsonRows);
    assert_eq!(parsed.rows.len(), 3);
    assert_eq!(parsed.rows[0].get(Column::Year), &CellValue::Number(1969.0));
    assert!(parsed.rows[1].get(Column::Year).is_blank());

    let wrapped = &parsed.rows[2];
    assert_eq!(wrapped.get(Column::Year), &CellValue::Number(1971.0));
    assert_eq!(wrapped.get(Column::Type), &CellValue::Empty);
    assert_eq!(wrapped.get(Column::Group), &CellValue::from("true"));
}

#[test]
fn json_rows_read_nested_cells_as_blank() {
    let parsed = JsonRowsDecoder
        .decode(&fixture("nested.json"))
        .expect("nested cells should not fail the sheet");

    assert_eq!(parsed.rows.len(), 2);
    let first = &parsed.rows[0];
    assert_eq!(first.get(Column::Year), &CellValue::Number(1969.0));
    assert!(first.get(Column::Headline).is_blank());
    assert!(parsed.rows[1].get(Column::Year).is_blank());
    assert_eq!(parsed.rows[1].get(Column::Headline), &CellValue::from("Gagarin"));
}

#[test]
fn csv_without_known_columns_is_an_invalid_header() {
    let err = decode_path(&fixture_path("no_columns.csv")).unwrap_err();
    assert!(matches!(err, ParserError::InvalidHeader { .. }));
}

#[test]
fn unknown_binary_input_reports_every_attempt() {
    let err = decode_sheet(&[0xff, 0xfe, 0x00, 0x01]).unwrap_err();
    match err {
        ParserError::NoMatchingDecoder { attempts } => {
            let names: Vec<&str> = attempts.iter().map(|attempt| attempt.decoder).collect();
            assert_eq!(names, vec!["workbook", "json_rows", "delimited"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn row_serializes_as_header_map_for_diagnostics() {
    let parsed = JsonRowsDecoder.decode(&fixture("events.json")).unwrap();
    let json = serde_json::to_value(&parsed.rows[1]).unwrap();
    assert_eq!(json, serde_json::json!({"Headline": "Bad Row"}));
}

#[test]
fn empty_json_array_is_an_empty_sheet() {
    let parsed = JsonRowsDecoder.decode(b"[]").unwrap();
    assert!(parsed.rows.is_empty());
    assert!(parsed.columns.is_empty());
}
