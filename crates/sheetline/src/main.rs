use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetline_core::SheetlineConfig;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::convert::{handle_convert_command, ConvertArgs};
use commands::export::{handle_export_command, ExportArgs};
use commands::inspect::{handle_inspect_command, InspectArgs};

const DEFAULT_LOG_FILTER: &str = "sheetline=info,sheetline_core=info,sheetline_parser=info";

/// Turn a timeline spreadsheet into TimelineJS data or a standalone page.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file (defaults to $SHEETLINE_CONFIG, then ./sheetline.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a spreadsheet to timeline JSON
    Convert(ConvertArgs),
    /// Write a standalone HTML page for a spreadsheet or timeline document
    Export(ExportArgs),
    /// List accepted events and rejected rows
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = SheetlineConfig::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Command::Convert(args) => handle_convert_command(args, config),
        Command::Export(args) => handle_export_command(args, config),
        Command::Inspect(args) => handle_inspect_command(args, config),
    }
}
