//! CLI override merging

use crate::domain::Config;
use crate::utils::normalize_path;
use std::path::PathBuf;

/// Values given on the command line. `None` / empty leaves the file value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub roots: Vec<String>,
    pub output_path: Option<PathBuf>,
    pub worker_count: Option<usize>,
    pub svn_binary: Option<String>,
    pub exclude_globs: Option<Vec<String>>,
    pub open_report: Option<bool>,
}

pub fn merge_cli_with_config(mut config: Config, overrides: CliOverrides) -> Config {
    if !overrides.roots.is_empty() {
        config.roots = overrides.roots;
    }
    if let Some(output_path) = overrides.output_path {
        config.output_path = output_path;
    }
    if overrides.worker_count.is_some() {
        config.worker_count = overrides.worker_count;
    }
    if let Some(svn_binary) = overrides.svn_binary {
        config.svn_binary = svn_binary;
    }
    if let Some(exclude_globs) = overrides.exclude_globs {
        config.exclude_globs = exclude_globs;
    }
    if let Some(open_report) = overrides.open_report {
        config.open_report = open_report;
    }

    config.roots = config.roots.iter().map(|root| normalize_path(root.trim())).collect();
    config.roots.dedup();
    config
}
