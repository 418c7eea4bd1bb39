use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sheetline_core::{convert_path, sanitize_document, SheetlineConfig};
use tracing::info;

use super::write_output;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Spreadsheet to read (xlsx, xls, ods, csv, tsv or JSON rows)
    pub input: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Headline of the placeholder title slide
    #[arg(long)]
    pub title: Option<String>,

    /// Text of the placeholder title slide
    #[arg(long)]
    pub title_text: Option<String>,
}

pub fn handle_convert_command(args: ConvertArgs, mut config: SheetlineConfig) -> Result<()> {
    if let Some(headline) = args.title {
        config.title.headline = headline;
    }
    if let Some(text) = args.title_text {
        config.title.text = text;
    }

    let conversion = convert_path(&args.input, &config.title)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    let document = sanitize_document(&conversion.document)?;
    let json = if args.compact {
        serde_json::to_string(&document)?
    } else {
        serde_json::to_string_pretty(&document)?
    };

    write_output(args.output.as_deref(), &json)?;
    if let Some(path) = &args.output {
        info!(path = %path.display(), events = conversion.summary.accepted_events, "wrote timeline document");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_compact_document_with_title_override() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("events.csv");
        fs::write(&input, "Year,Headline\n1969,Moon Landing\n,Bad Row\n").unwrap();
        let output = dir.path().join("timeline.json");

        handle_convert_command(
            ConvertArgs {
                input,
                output: Some(output.clone()),
                compact: true,
                title: Some("Space Race".to_string()),
                title_text: None,
            },
            SheetlineConfig::default(),
        )
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(written["title"]["text"]["headline"], "Space Race");
        assert_eq!(written["title"]["text"]["text"], "Generated from Excel");
        assert_eq!(written["events"].as_array().map(Vec::len), Some(1));
    }
}
