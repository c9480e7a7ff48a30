//! CLI argument definitions for the rollup tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rollup",
    version,
    about = "Consolidate coincident rows of time-ordered CSV tables",
    long_about = "Merge rows of a time-ordered table that share a timestamp.\n\n\
                  Gaps in earlier rows are filled from later ones; conflicting\n\
                  values are flagged and block the merge unless the column is\n\
                  listed as an override. Also provides grouped summaries,\n\
                  rankings and column profiles."
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
    /// Merge rows that share a timestamp.
    Consolidate(ConsolidateArgs),

    /// Count and sum a measure per category combination.
    Summarize(SummarizeArgs),

    /// Rank rows by a totals column, optionally within subgroups.
    Rank(RankArgs),

    /// Show null counts, cardinality and numeric range per column.
    Profile(ProfileArgs),
}

/// Input and output shared by every subcommand.
#[derive(Args)]
pub struct TableArgs {
    /// CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Write the resulting table to this CSV file instead of printing it.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Read every column as text instead of inferring numeric and boolean types.
    #[arg(long = "no-infer")]
    pub no_infer: bool,
}

#[derive(Args)]
pub struct ConsolidateArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Column whose values decide coincidence.
    #[arg(long = "timestamp", short = 't', value_name = "COLUMN")]
    pub timestamp: Option<String>,

    /// Data columns to reconcile, in order.
    #[arg(long = "columns", short = 'c', value_name = "COLUMNS", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Data columns where the later row's value wins a conflict.
    #[arg(long = "override", value_name = "COLUMNS", value_delimiter = ',')]
    pub overrides: Vec<String>,

    /// Add the conflict marker column to the output.
    #[arg(long = "flag-conflicts")]
    pub flag_conflicts: bool,

    /// Leave the conflict marker column out, even if the options file asks
    /// for it.
    #[arg(long = "no-flag-conflicts", conflicts_with = "flag_conflicts")]
    pub no_flag_conflicts: bool,

    /// Keep every row and emit the keep/coincident markers instead of
    /// dropping merged rows.
    #[arg(long = "flagged")]
    pub flagged: bool,

    /// Drop merged rows, even if the options file selects flagged output.
    #[arg(long = "cleaned", conflicts_with = "flagged")]
    pub cleaned: bool,

    /// Which rows of a conflicting pairing get the conflict marker.
    #[arg(long = "conflict-marking", value_enum)]
    pub conflict_marking: Option<ConflictMarkingArg>,

    /// JSON file with consolidation options; flags given on the command
    /// line take precedence.
    #[arg(long = "options", value_name = "JSON")]
    pub options: Option<PathBuf>,

    /// Write the consolidation report as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Category columns to group by.
    #[arg(
        long = "group-by",
        short = 'g',
        value_name = "COLUMNS",
        value_delimiter = ',',
        required = true
    )]
    pub group_by: Vec<String>,

    /// Numeric column to count and sum.
    #[arg(long = "measure", short = 'm', value_name = "COLUMN")]
    pub measure: String,

    /// Name of the row-count field.
    #[arg(long = "count-name", default_value = "count")]
    pub count_name: String,

    /// Name of the sum field.
    #[arg(long = "sum-name", default_value = "sum")]
    pub sum_name: String,
}

#[derive(Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Column to rank by, highest first.
    #[arg(long = "totals", value_name = "COLUMN")]
    pub totals: String,

    /// Name of the rank column.
    #[arg(long = "rank-name", default_value = "rank")]
    pub rank_name: String,

    /// Columns whose combinations restart the ranking.
    #[arg(long = "subgroup", value_name = "COLUMNS", value_delimiter = ',')]
    pub subgroups: Vec<String>,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

/// CLI conflict marking choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ConflictMarkingArg {
    BothRows,
    LaterRowOnly,
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
