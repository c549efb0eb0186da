//! List command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{parse_csv, resolve_config};
use crate::config::CliOverrides;
use crate::fetch::SvnClient;
use crate::scan::{walk_documents, WalkOptions};

#[derive(Args)]
pub struct ListArgs {
    /// Repository URLs to walk (overrides `roots` from the config file)
    #[arg(value_name = "ROOT")]
    pub roots: Vec<String>,

    /// Path to config file (review-board.toml or review-board.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// svn executable to invoke
    #[arg(long, value_name = "BIN", env = "REVIEW_BOARD_SVN")]
    pub svn: Option<String>,

    /// Skip repository paths matching these globs (comma-separated)
    #[arg(short = 'e', long, value_name = "GLOBS")]
    pub exclude_glob: Option<String>,
}

pub fn run(args: ListArgs) -> Result<()> {
    let config = resolve_config(
        args.config.as_deref(),
        CliOverrides {
            roots: args.roots,
            svn_binary: args.svn,
            exclude_globs: parse_csv(&args.exclude_glob),
            ..CliOverrides::default()
        },
    )?;

    let client = SvnClient::new(config.svn_binary.clone());
    let options = WalkOptions::from_config(&config)?;

    let mut total = 0usize;
    for root in &config.roots {
        let (mut documents, stats) = walk_documents(&client, root, &options);
        documents.sort();
        for document in &documents {
            println!("{}", document);
        }
        eprintln!(
            "{}: {} documents ({} directories listed, {} excluded)",
            root, stats.documents_found, stats.directories_listed, stats.entries_excluded
        );
        total += documents.len();
    }
    eprintln!("Total: {} documents", total);
    Ok(())
}
