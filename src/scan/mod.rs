//! Remote document discovery

use crate::domain::Config;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

pub mod tree;

pub use tree::walk_documents;

/// Counters collected while walking a repository tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub directories_listed: usize,
    pub documents_found: usize,
    pub entries_excluded: usize,
}

/// What the walker keeps: the document extension and glob excludes.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    extension: String,
    exclude: GlobSet,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self { extension: ".xlsx".to_string(), exclude: GlobSet::empty() }
    }
}

impl WalkOptions {
    pub fn new(extension: &str, exclude_globs: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_globs {
            let glob =
                Glob::new(pattern).with_context(|| format!("Invalid exclude glob '{pattern}'"))?;
            builder.add(glob);
        }
        Ok(Self {
            extension: extension.to_ascii_lowercase(),
            exclude: builder.build().context("Failed building exclude globs")?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.extension, &config.exclude_globs)
    }

    fn is_document(&self, name: &str) -> bool {
        // Office leaves `~$name.xlsx` lock files next to open workbooks
        !name.starts_with("~$") && name.to_ascii_lowercase().ends_with(&self.extension)
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude.is_match(path)
    }
}
