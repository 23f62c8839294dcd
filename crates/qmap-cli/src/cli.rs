//! CLI argument definitions for qmap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qmap_ingest::{IngestOptions, SheetSelector};
use qmap_map::DEFAULT_MIN_CONFIDENCE;

#[derive(Parser)]
#[command(
    name = "qmap",
    version,
    about = "Map, edit, and validate questionnaire worksheets",
    long_about = "Load a questionnaire worksheet, map its columns onto the fields a\n\
                  downstream consumer expects, apply edits, and validate the\n\
                  hierarchical order numbering before handing the rows on as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the columns and rows of a worksheet.
    Inspect(InspectArgs),

    /// Validate order numbering and logical columns.
    Validate(MappedArgs),

    /// Apply a JSON script of edits, validate, and write the result.
    Apply(ApplyArgs),

    /// Write the (optionally remapped) rows as mapping JSON.
    Export(ExportArgs),

    /// Suggest which source column feeds each logical field.
    Suggest(SuggestArgs),
}

/// Input selection shared by every command.
#[derive(Args)]
pub struct InputArgs {
    /// Workbook (xlsx, xlsm, xls, xlsb, ods), CSV, or preloaded mapping JSON.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Sheet to read, by zero-based index or by name.
    #[arg(long = "sheet", value_name = "SHEET", default_value = "0")]
    pub sheet: SheetSelector,

    /// Keep rows whose cells are all empty.
    #[arg(long = "keep-blank-rows")]
    pub keep_blank_rows: bool,
}

impl InputArgs {
    pub fn ingest_options(&self) -> IngestOptions {
        let options = IngestOptions::new().with_sheet(self.sheet.clone());
        if self.keep_blank_rows {
            options.keep_blank_rows()
        } else {
            options
        }
    }
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// List the workbook's sheets instead of showing rows.
    #[arg(long = "list-sheets")]
    pub list_sheets: bool,

    /// Maximum number of rows to print.
    #[arg(long = "limit", value_name = "N", default_value_t = 20)]
    pub limit: usize,
}

/// Input plus column remaps applied before anything else.
#[derive(Args)]
pub struct MappedArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Fill a logical field from a source column (repeatable).
    #[arg(long = "map", value_name = "TARGET=SOURCE", value_parser = parse_mapping)]
    pub mappings: Vec<(String, String)>,
}

#[derive(Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub mapped: MappedArgs,

    /// JSON array of edit commands.
    #[arg(long = "script", value_name = "PATH")]
    pub script: PathBuf,

    /// Where to write the edited rows.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the output even when validation reports errors.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub mapped: MappedArgs,

    /// Output path (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Minimum similarity for a suggestion (0.0 to 1.0).
    #[arg(long = "min-confidence", value_name = "SCORE", default_value_t = DEFAULT_MIN_CONFIDENCE)]
    pub min_confidence: f32,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Parses `TARGET=SOURCE`.
fn parse_mapping(raw: &str) -> Result<(String, String), String> {
    let (target, source) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TARGET=SOURCE, got '{raw}'"))?;
    let (target, source) = (target.trim(), source.trim());
    if target.is_empty() || source.is_empty() {
        return Err(format!("expected TARGET=SOURCE, got '{raw}'"));
    }
    Ok((target.to_string(), source.to_string()))
}
