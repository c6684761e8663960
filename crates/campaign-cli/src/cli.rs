//! CLI argument definitions for the campaign mapping tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "campaign-mapper",
    version,
    about = "Map campaign export columns onto the canonical analytics schema",
    long_about = "Validate, suggest and store column-to-field mappings for campaign data uploads.\n\n\
                  Detected columns are read from the JSON produced by the upload service.\n\
                  A mapping is valid once every required field is mapped and every\n\
                  number field is fed by a number column."
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

    #[command(flatten)]
    pub schema: SchemaArgs,
}

/// Where the canonical schema comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {
    /// CSV schema override (default: CAMPAIGN_SCHEMA_PATH or the built-in schema).
    #[arg(long = "schema", value_name = "CSV", global = true)]
    pub schema: Option<PathBuf>,

    /// Version of the CSV schema override (default: CAMPAIGN_SCHEMA_VERSION).
    #[arg(long = "schema-version", value_name = "VERSION", global = true)]
    pub schema_version: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the canonical schema fields.
    Fields,

    /// Validate a column mapping against detected columns.
    Validate(ValidateArgs),

    /// Suggest a mapping from detected column names.
    Suggest(SuggestArgs),

    /// Manage stored mapping templates.
    #[command(subcommand)]
    Templates(TemplateCommand),
}

#[derive(Args)]
pub struct RepositoryArgs {
    /// Template directory (default: CAMPAIGN_TEMPLATE_DIR or ./templates).
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// JSON array of detected columns.
    #[arg(long = "columns", value_name = "JSON")]
    pub columns: PathBuf,

    /// JSON object mapping column names to field names.
    #[arg(
        long = "mapping",
        value_name = "JSON",
        conflicts_with_all = ["template", "platform"]
    )]
    pub mapping: Option<PathBuf>,

    /// Name of a stored template to load instead of --mapping.
    #[arg(long = "template", value_name = "NAME", requires = "platform")]
    pub template: Option<String>,

    /// Platform of the stored template; alone, loads the platform default.
    #[arg(long = "platform", value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Reject column or field names that are not known.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Print the validation result as JSON.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub repository: RepositoryArgs,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// JSON array of detected columns.
    #[arg(long = "columns", value_name = "JSON")]
    pub columns: PathBuf,

    /// Minimum confidence (0.0-1.0) for a suggestion.
    #[arg(long = "min-confidence", default_value_t = 0.6)]
    pub min_confidence: f32,

    /// Confidence bands used to label suggestions.
    #[arg(long = "thresholds", value_enum, default_value = "default")]
    pub thresholds: ThresholdsArg,

    /// Save the suggestions as a template with this name.
    #[arg(long = "save", value_name = "NAME", requires = "platform")]
    pub save: Option<String>,

    /// Platform for the saved template.
    #[arg(long = "platform", value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Mark the saved template as the platform default.
    #[arg(long = "default")]
    pub default: bool,

    /// Mark the saved template as shared.
    #[arg(long = "shared")]
    pub shared: bool,

    #[command(flatten)]
    pub repository: RepositoryArgs,
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List stored templates.
    List {
        /// Only list templates for this platform.
        #[arg(long = "platform")]
        platform: Option<String>,

        #[command(flatten)]
        repository: RepositoryArgs,
    },

    /// Print a stored template as JSON.
    Show {
        platform: String,
        name: String,

        #[command(flatten)]
        repository: RepositoryArgs,
    },

    /// Delete a stored template.
    Delete {
        platform: String,
        name: String,

        #[command(flatten)]
        repository: RepositoryArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThresholdsArg {
    Default,
    Strict,
    Relaxed,
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
