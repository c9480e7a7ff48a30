use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use rollup_core::{Consolidation, consolidate_with_report};
use rollup_ingest::{IngestOptions, read_csv_frame, write_csv_frame};
use rollup_model::{ConflictMarking, ConsolidateOptions, OutputMode};
use rollup_summary::{profile, rank, summarize};

use crate::cli::{
    ConflictMarkingArg, ConsolidateArgs, ProfileArgs, RankArgs, SummarizeArgs, TableArgs,
};

/// A finished consolidation and where its artifacts went.
#[derive(Debug)]
pub struct ConsolidateResult {
    pub consolidation: Consolidation,
    pub output: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

/// A derived table and the file it was written to, if any.
#[derive(Debug)]
pub struct FrameResult {
    pub frame: DataFrame,
    pub output: Option<PathBuf>,
}

fn load_table(args: &TableArgs) -> Result<DataFrame> {
    let options = IngestOptions {
        infer_types: !args.no_infer,
    };
    read_csv_frame(&args.input, &options)
        .with_context(|| format!("load table: {}", args.input.display()))
}

fn store_table(frame: &DataFrame, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        write_csv_frame(frame, path).with_context(|| format!("write table: {}", path.display()))?;
    }
    Ok(())
}

fn load_options_file(path: &Path) -> Result<ConsolidateOptions> {
    let file = File::open(path).with_context(|| format!("open options: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse options: {}", path.display()))
}

/// Build engine options from an optional JSON file overlaid with CLI flags.
pub fn build_options(args: &ConsolidateArgs) -> Result<ConsolidateOptions> {
    let mut options = match (&args.options, &args.timestamp) {
        (Some(path), _) => load_options_file(path)?,
        (None, Some(timestamp)) => ConsolidateOptions::new(timestamp.clone(), Vec::<String>::new()),
        (None, None) => bail!("a timestamp column is required (--timestamp or --options)"),
    };

    if let Some(timestamp) = &args.timestamp {
        options.timestamp_column.clone_from(timestamp);
    }
    if !args.columns.is_empty() {
        options.data_columns.clone_from(&args.columns);
    }
    if !args.overrides.is_empty() {
        options = options.with_overrides(args.overrides.iter().cloned());
    }
    if args.flag_conflicts {
        options.flag_conflicts = true;
    } else if args.no_flag_conflicts {
        options.flag_conflicts = false;
    }
    if args.flagged {
        options.output_mode = OutputMode::Flagged;
    } else if args.cleaned {
        options.output_mode = OutputMode::Cleaned;
    }
    if let Some(marking) = args.conflict_marking {
        options.conflict_marking = match marking {
            ConflictMarkingArg::BothRows => ConflictMarking::BothRows,
            ConflictMarkingArg::LaterRowOnly => ConflictMarking::LaterRowOnly,
        };
    }
    debug!(options = ?options, "resolved consolidation options");
    Ok(options)
}

pub fn run_consolidate(args: &ConsolidateArgs) -> Result<ConsolidateResult> {
    let span = info_span!("consolidate", input = %args.table.input.display());
    let _guard = span.enter();

    let options = build_options(args)?;
    let df = load_table(&args.table)?;
    let consolidation = consolidate_with_report(&df, &options)
        .with_context(|| format!("consolidate {}", args.table.input.display()))?;

    store_table(&consolidation.data, args.table.output.as_deref())?;
    if let Some(path) = &args.report_json {
        let json = serde_json::to_string_pretty(&consolidation.report)
            .context("serialize consolidation report")?;
        std::fs::write(path, json)
            .with_context(|| format!("write report: {}", path.display()))?;
        info!(path = %path.display(), "wrote consolidation report");
    }

    Ok(ConsolidateResult {
        consolidation,
        output: args.table.output.clone(),
        report_json: args.report_json.clone(),
    })
}

pub fn run_summarize(args: &SummarizeArgs) -> Result<FrameResult> {
    let df = load_table(&args.table)?;
    let frame = summarize(
        &df,
        &args.group_by,
        &args.measure,
        &args.count_name,
        &args.sum_name,
    )
    .with_context(|| format!("summarize {}", args.table.input.display()))?;
    store_table(&frame, args.table.output.as_deref())?;
    Ok(FrameResult {
        frame,
        output: args.table.output.clone(),
    })
}

pub fn run_rank(args: &RankArgs) -> Result<FrameResult> {
    let df = load_table(&args.table)?;
    let frame = rank(&df, &args.rank_name, &args.totals, &args.subgroups)
        .with_context(|| format!("rank {}", args.table.input.display()))?;
    store_table(&frame, args.table.output.as_deref())?;
    Ok(FrameResult {
        frame,
        output: args.table.output.clone(),
    })
}

pub fn run_profile(args: &ProfileArgs) -> Result<FrameResult> {
    let df = load_table(&args.table)?;
    let frame = profile(&df).with_context(|| format!("profile {}", args.table.input.display()))?;
    store_table(&frame, args.table.output.as_deref())?;
    Ok(FrameResult {
        frame,
        output: args.table.output.clone(),
    })
}
