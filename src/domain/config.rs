//! Run configuration and its defaults

use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Everything a run needs, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Repository URLs to walk for review documents
    #[serde(deserialize_with = "string_or_list")]
    pub roots: Vec<String>,
    pub output_path: PathBuf,
    /// Worker threads for the fan-out stage; `None` uses the host default
    pub worker_count: Option<usize>,
    pub score_bins: Vec<ScoreBin>,
    pub svn_binary: String,
    pub extension: String,
    pub sheet_name: String,
    pub version_cell: String,
    pub score_cell: String,
    pub classification: ClassificationRule,
    #[serde(deserialize_with = "string_or_list")]
    pub exclude_globs: Vec<String>,
    pub open_report: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            output_path: PathBuf::from("review_board.xlsx"),
            worker_count: None,
            score_bins: default_score_bins(),
            svn_binary: "svn".to_string(),
            extension: ".xlsx".to_string(),
            sheet_name: "DR-SW".to_string(),
            version_cell: "K7".to_string(),
            score_cell: "J2".to_string(),
            classification: ClassificationRule::default(),
            exclude_globs: Vec::new(),
            open_report: true,
        }
    }
}

impl Config {
    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            bail!("No repository roots configured (pass ROOTS or set `roots` in the config file)");
        }
        if self.worker_count == Some(0) {
            bail!("worker_count must be greater than zero");
        }
        if self.score_bins.is_empty() {
            bail!("At least one score bin is required");
        }
        for bin in &self.score_bins {
            if !(bin.low < bin.high) {
                bail!("Score bin '{}' has low {} not below high {}", bin.label, bin.low, bin.high);
            }
            bin.rgb()?;
        }
        if !self.extension.starts_with('.') {
            bail!("extension must start with '.', got '{}'", self.extension);
        }
        Ok(())
    }
}

/// A labelled percentage range used for the overview sheet and score coloring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreBin {
    pub label: String,
    pub low: f64,
    pub high: f64,
    /// Fill color as a hex RGB string, e.g. `FF0000`
    pub color: String,
}

impl ScoreBin {
    pub fn new(label: &str, low: f64, high: f64, color: &str) -> Self {
        Self { label: label.to_string(), low, high, color: color.to_string() }
    }

    /// Half-open membership test; `inclusive_high` closes the range for the top bin.
    pub fn contains(&self, percent: f64, inclusive_high: bool) -> bool {
        percent >= self.low
            && (percent < self.high || (inclusive_high && percent == self.high))
    }

    pub fn rgb(&self) -> Result<u32> {
        let hex = self.color.trim_start_matches('#');
        if hex.len() != 6 {
            bail!(
                "Score bin '{}' color '{}' is not a 6-digit hex RGB value",
                self.label,
                self.color
            );
        }
        u32::from_str_radix(hex, 16).map_err(|_| {
            anyhow::anyhow!("Score bin '{}' color '{}' is not valid hex", self.label, self.color)
        })
    }
}

/// The three review bands used when no bins are configured.
pub fn default_score_bins() -> Vec<ScoreBin> {
    vec![
        ScoreBin::new("<80%", 0.0, 80.0, "FF0000"),
        ScoreBin::new("80% - 95%", 80.0, 95.0, "FFFF00"),
        ScoreBin::new(">=95%", 95.0, 100.0, "00FF00"),
    ]
}

/// Find the bin holding `percent`. The last bin is closed at its upper bound.
pub fn bin_index(bins: &[ScoreBin], percent: f64) -> Option<usize> {
    let last = bins.len().checked_sub(1)?;
    bins.iter().enumerate().position(|(idx, bin)| bin.contains(percent, idx == last))
}

/// Substring rule that assigns each document to one of two controller labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationRule {
    pub marker: String,
    pub matched: String,
    pub fallback: String,
}

impl Default for ClassificationRule {
    fn default() -> Self {
        Self {
            marker: "01_ComController DSPA".to_string(),
            matched: "ComController DSPA".to_string(),
            fallback: "ObcController DSPB".to_string(),
        }
    }
}

impl ClassificationRule {
    pub fn classify(&self, path: &str) -> &str {
        if path.contains(&self.marker) {
            &self.matched
        } else {
            &self.fallback
        }
    }
}

/// Accept either a list of strings or a single comma-separated string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    let items = match StringOrList::deserialize(deserializer)? {
        StringOrList::One(value) => value.split(',').map(str::to_string).collect::<Vec<_>>(),
        StringOrList::Many(values) => values,
    };
    Ok(items.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
}
