use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use sheetline_core::{convert_path, Conversion, DateParts, SheetlineConfig};
use sheetline_parser::Column;

#[derive(Args, Debug)]
pub struct InspectArgs {
    pub input: PathBuf,
}

pub fn handle_inspect_command(args: InspectArgs, config: SheetlineConfig) -> Result<()> {
    let conversion = convert_path(&args.input, &config.title)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;

    let summary = &conversion.summary;
    println!(
        "{} ({}): {} rows, {} events, {} rejected",
        args.input.display(),
        summary
            .sheet_name
            .as_deref()
            .unwrap_or_else(|| summary.format.map(|format| format.as_str()).unwrap_or("unknown")),
        summary.total_rows,
        summary.accepted_events,
        summary.rejected_rows,
    );
    println!("title: {}", conversion.document.title.text().headline);
    println!("{}", events_table(&conversion));
    if !conversion.rejections.is_empty() {
        println!("{}", rejections_table(&conversion));
    }
    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn events_table(conversion: &Conversion) -> Table {
    let mut table = new_table(vec!["#", "Start", "End", "Headline", "Group", "Media"]);
    for (position, event) in conversion.document.events.iter().enumerate() {
        table.add_row(vec![
            (position + 1).to_string(),
            format_date(&event.start_date),
            event.end_date.as_ref().map(format_date).unwrap_or_default(),
            event.text.headline.clone(),
            event.group.clone().unwrap_or_default(),
            event
                .media
                .as_ref()
                .map(|media| media.url.clone())
                .unwrap_or_default(),
        ]);
    }
    table
}

fn rejections_table(conversion: &Conversion) -> Table {
    let mut table = new_table(vec!["Sheet row", "Reason", "Headline"]);
    for rejection in &conversion.rejections {
        table.add_row(vec![
            rejection.sheet_row.to_string(),
            rejection.reason.to_string(),
            rejection.row.get(Column::Headline).to_string(),
        ]);
    }
    table
}

fn format_date(date: &DateParts) -> String {
    let mut out = date.year.map(|year| year.to_string()).unwrap_or_default();
    for part in [date.month, date.day].into_iter().flatten() {
        out.push_str(&format!("-{part:02}"));
    }
    if let Some(hour) = date.hour {
        out.push_str(&format!(
            " {hour:02}:{:02}:{:02}",
            date.minute.unwrap_or(0),
            date.second.unwrap_or(0)
        ));
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_only_present_parts() {
        assert_eq!(format_date(&DateParts::year(1969)), "1969");
        let landing = DateParts {
            month: Some(7),
            day: Some(20),
            hour: Some(20),
            minute: Some(17),
            ..DateParts::year(1969)
        };
        assert_eq!(format_date(&landing), "1969-07-20 20:17:00");
    }
}
