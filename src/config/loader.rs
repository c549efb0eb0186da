//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Section name under which the settings may be nested.
const SECTION: &str = "review-board";

const CANDIDATES: &[&str] = &[
    "review-board.toml",
    ".review-board.toml",
    "review-board.yml",
    ".review-board.yml",
    "review-board.yaml",
    ".review-board.yaml",
];

/// Load configuration from `config_path`, or from a file discovered in `anchor_dir`.
///
/// An explicitly given file must exist and parse. An auto-discovered file
/// that fails to parse is reported and defaults are used instead.
pub fn load_config(anchor_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(anchor_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Parse TOML config, supporting a nested `[review-board]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = raw.get(SECTION).cloned().unwrap_or(raw);

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `review-board` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty file parses as null
    let config_val = match raw {
        serde_yaml::Value::Null => return Ok(Config::default()),
        other => other.get(SECTION).cloned().unwrap_or(other),
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(anchor_dir: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| anchor_dir.join(candidate)).find(|path| path.exists())
}
