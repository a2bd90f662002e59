//! CLI argument definitions for the LookML view generator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lookml-gen",
    version,
    about = "Generate LookML views from spreadsheet column metadata",
    long_about = "Generate LookML view files from spreadsheet column metadata.\n\n\
                  Each sheet is split into tables at blank-ID rows; every table becomes\n\
                  one .view.lkml file that extends the matching base templates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with generator options (template dir, labels, overrides).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Generate views (and optional JSON outputs) from metadata sheets.
    Generate(GenerateArgs),

    /// Build the table relationship graph from a JSON table listing.
    Links(LinksArgs),

    /// List the base templates found in the template directory.
    Templates(TemplatesArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Metadata sheets (.xlsx, .xlsm, .xls, .xlsb, .ods or .csv).
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Root directory for generated views.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "#generated")]
    pub output_dir: PathBuf,

    /// Directory holding the base `.view.lkml` templates.
    #[arg(long = "base-views", value_name = "DIR")]
    pub base_views: Option<PathBuf>,

    /// Model directory name (default: the input file name without extension).
    ///
    /// Only meaningful with a single input file.
    #[arg(long = "model-name", value_name = "NAME")]
    pub model_name: Option<String>,

    /// Skip view generation.
    #[arg(long = "no-lookml")]
    pub no_lookml: bool,

    /// Write the segmented tables of each input as JSON.
    #[arg(long = "save-datasets")]
    pub save_datasets: bool,

    /// Directory for the JSON table dumps.
    #[arg(long = "datasets-dir", value_name = "DIR", default_value = ".")]
    pub datasets_dir: PathBuf,

    /// Build the relationship graph from this JSON table listing.
    #[arg(long = "connections", value_name = "JSON")]
    pub connections: Option<PathBuf>,

    /// Output path for the relationship graph.
    #[arg(long = "links-output", value_name = "PATH", default_value = "link_data.json")]
    pub links_output: PathBuf,

    /// Render everything without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct LinksArgs {
    /// JSON table listing: `{table: [records]}` or a dataset dump.
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    /// Output path for the relationship graph.
    #[arg(long = "output", value_name = "PATH", default_value = "link_data.json")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct TemplatesArgs {
    /// Directory holding the base `.view.lkml` templates.
    #[arg(long = "base-views", value_name = "DIR")]
    pub base_views: Option<PathBuf>,
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
