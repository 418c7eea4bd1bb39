use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sheetline_core::{convert_path, write_standalone_html, SheetlineConfig, TimelineDocument};
use tracing::info;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Spreadsheet, or timeline JSON when --document is given
    pub input: PathBuf,

    /// File or directory to write (defaults to the configured file name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat INPUT as a previously converted timeline document
    #[arg(long)]
    pub document: bool,

    #[arg(long)]
    pub css_url: Option<String>,

    #[arg(long)]
    pub js_url: Option<String>,

    /// Renderer height (bare numbers are pixels)
    #[arg(long)]
    pub height: Option<String>,

    #[arg(long)]
    pub width: Option<String>,
}

pub fn handle_export_command(args: ExportArgs, mut config: SheetlineConfig) -> Result<()> {
    let export = &mut config.export;
    for (flag, target) in [
        (args.css_url, &mut export.css_url),
        (args.js_url, &mut export.js_url),
        (args.height, &mut export.height),
        (args.width, &mut export.width),
    ] {
        if let Some(value) = flag {
            *target = value;
        }
    }

    let document = if args.document {
        let json = fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read {}", args.input.display()))?;
        TimelineDocument::from_json(&json)
            .with_context(|| format!("{} is not a timeline document", args.input.display()))?
    } else {
        convert_path(&args.input, &config.title)
            .with_context(|| format!("failed to convert {}", args.input.display()))?
            .document
    };

    let target = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.export.file_name));
    let written = write_standalone_html(&document, &config.export, &target)
        .with_context(|| format!("failed to export to {}", target.display()))?;
    info!(path = %written.display(), events = document.events.len(), "export finished");
    Ok(())
}
