//! Audit command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use super::utils::{parse_csv, resolve_config};
use crate::audit::run_audit;
use crate::config::CliOverrides;
use crate::fetch::SvnClient;
use crate::render::{
    write_summary, write_workbook, NoPreview, PreviewHook, ReportModel, SystemViewer,
};

#[derive(Args)]
pub struct AuditArgs {
    /// Repository URLs to audit (overrides `roots` from the config file)
    #[arg(value_name = "ROOT")]
    pub roots: Vec<String>,

    /// Path to config file (review-board.toml or review-board.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report workbook to write
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Worker threads for fetching documents (default: number of CPUs)
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// svn executable to invoke
    #[arg(long, value_name = "BIN", env = "REVIEW_BOARD_SVN")]
    pub svn: Option<String>,

    /// Skip repository paths matching these globs (comma-separated)
    #[arg(short = 'e', long, value_name = "GLOBS")]
    pub exclude_glob: Option<String>,

    /// Do not open the report after writing it
    #[arg(long)]
    pub no_open: bool,

    /// Also write a JSON run summary to this file
    #[arg(long, value_name = "FILE")]
    pub summary_json: Option<PathBuf>,

    /// Omit the generation timestamp from the JSON summary
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(args: AuditArgs) -> Result<()> {
    let start_time = Instant::now();

    let config = resolve_config(
        args.config.as_deref(),
        CliOverrides {
            roots: args.roots,
            output_path: args.output,
            worker_count: args.workers,
            svn_binary: args.svn,
            exclude_globs: parse_csv(&args.exclude_glob),
            open_report: if args.no_open { Some(false) } else { None },
        },
    )?;

    let client = SvnClient::new(config.svn_binary.clone());
    let outcome = run_audit(&client, &config)?;
    let model = ReportModel::build(&outcome, &config.score_bins);

    write_workbook(&model, &config.output_path)?;
    if let Some(summary_path) = args.summary_json.as_deref() {
        write_summary(summary_path, &config.output_path, &outcome, &model, !args.no_timestamp)?;
    }

    println!();
    println!("Audit complete!");
    println!();
    println!("Statistics:");
    println!("  Roots:           {}", config.roots.len());
    println!("  Documents found: {}", outcome.documents_found);
    println!("  Records:         {}", outcome.records.len());
    println!("  Unscored:        {}", model.unscored);
    println!("  Failed:          {}", model.failed);
    for row in &model.overview {
        println!("    {:<12} {:>5}  {}", row.label, row.count, row.percentage);
    }
    println!("  Report:          {}", config.output_path.display());
    println!("  Elapsed:         {:.2}s", start_time.elapsed().as_secs_f64());

    let viewer: &dyn PreviewHook = if config.open_report { &SystemViewer } else { &NoPreview };
    viewer.preview(&config.output_path);

    Ok(())
}
