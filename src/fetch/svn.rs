//! `svn` command-line client wrapper

use crate::fetch::{parse_info, PathInfo, RepositoryClient};
use crate::utils::encode_url;
use std::process::{Command, Output};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvnError {
    #[error("failed to run `{program} {subcommand}`: {source}")]
    Spawn {
        program: String,
        subcommand: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("`svn {subcommand}` exited with {status}: {stderr}")]
    Exit { subcommand: &'static str, status: String, stderr: String },
}

/// Repository client backed by the `svn` executable.
///
/// Each call spawns one process and waits for it; there is no timeout.
#[derive(Debug, Clone)]
pub struct SvnClient {
    program: String,
}

impl SvnClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn run(&self, subcommand: &'static str, path: &str) -> Result<Vec<u8>, SvnError> {
        let url = encode_url(path);
        tracing::debug!("{} {} {}", self.program, subcommand, url);
        let output = Command::new(&self.program)
            .args([subcommand, url.as_str()])
            .output()
            .map_err(|source| SvnError::Spawn {
                program: self.program.clone(),
                subcommand,
                source,
            })?;
        check_status(subcommand, output)
    }

    /// Run and decode stdout; svn prints in the locale code page, so bytes
    /// that are not UTF-8 are replaced rather than rejected.
    fn run_text(&self, subcommand: &'static str, path: &str) -> Result<String, SvnError> {
        let bytes = self.run(subcommand, path)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(
                    "`svn {}` output for '{}' is not UTF-8, decoding lossily",
                    subcommand,
                    path
                );
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        })
    }

    pub fn try_list(&self, path: &str) -> Result<Vec<String>, SvnError> {
        let text = self.run_text("list", path)?;
        Ok(text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn try_fetch(&self, path: &str) -> Result<Vec<u8>, SvnError> {
        self.run("cat", path)
    }

    pub fn try_metadata(&self, path: &str) -> Result<PathInfo, SvnError> {
        Ok(parse_info(&self.run_text("info", path)?))
    }
}

fn check_status(subcommand: &'static str, output: Output) -> Result<Vec<u8>, SvnError> {
    if output.status.success() {
        return Ok(output.stdout);
    }
    Err(SvnError::Exit {
        subcommand,
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

impl RepositoryClient for SvnClient {
    fn list(&self, path: &str) -> Vec<String> {
        self.try_list(path).unwrap_or_else(|e| {
            tracing::warn!("Unable to list files for '{}': {}", path, e);
            Vec::new()
        })
    }

    fn fetch(&self, path: &str) -> Option<Vec<u8>> {
        self.try_fetch(path)
            .map_err(|e| tracing::warn!("Unable to fetch file '{}': {}", path, e))
            .ok()
    }

    fn metadata(&self, path: &str) -> Option<PathInfo> {
        self.try_metadata(path)
            .map_err(|e| tracing::warn!("Unable to fetch svn info for '{}': {}", path, e))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_degrades_to_sentinels() {
        let client = SvnClient::new("review-board-no-such-svn-binary");
        assert!(client.list("https://svn/repo").is_empty());
        assert!(client.fetch("https://svn/repo/a.xlsx").is_none());
        assert!(client.metadata("https://svn/repo/a.xlsx").is_none());
    }

    #[test]
    fn spawn_error_names_the_program() {
        let client = SvnClient::new("review-board-no-such-svn-binary");
        let err = client.try_list("https://svn/repo").expect_err("spawn should fail");
        assert!(matches!(err, SvnError::Spawn { .. }));
        assert!(err.to_string().contains("review-board-no-such-svn-binary list"));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_reports_stderr() {
        let client = SvnClient::new("false");
        let err = client.try_fetch("https://svn/repo/a.xlsx").expect_err("false exits 1");
        assert!(matches!(err, SvnError::Exit { subcommand: "cat", .. }));
    }

    #[cfg(unix)]
    mod latin1_output {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// Fake svn whose output carries a Latin-1 `ü` (0xFC).
        const SCRIPT: &str = r#"#!/bin/sh
case "$1" in
  list) printf 'good.xlsx\nPr\374fung/\n' ;;
  info)
    printf 'Path: a.xlsx\nRevision: 5\nLast Changed Author: M\374ller\n'
    printf 'Last Changed Rev: 4\nLast Changed Date: 2024-03-01 10:00:00 +0100\n'
    ;;
  *) exit 1 ;;
esac
"#;

        fn latin1_client(tmp: &TempDir) -> SvnClient {
            let script = tmp.path().join("fake-svn");
            fs::write(&script, SCRIPT).expect("write script");
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
            SvnClient::new(script.to_str().expect("utf8"))
        }

        #[test]
        fn list_keeps_entries_around_non_utf8_names() {
            let tmp = TempDir::new().expect("tmp");
            let entries = latin1_client(&tmp).list("https://svn/repo");
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0], "good.xlsx");
            assert!(entries[1].starts_with("Pr") && entries[1].ends_with("fung/"));
        }

        #[test]
        fn metadata_survives_non_utf8_author() {
            let tmp = TempDir::new().expect("tmp");
            let info = latin1_client(&tmp).metadata("https://svn/repo/a.xlsx").expect("info");
            assert_eq!(info.revision.as_deref(), Some("5"));
            assert_eq!(info.last_changed_revision.as_deref(), Some("4"));
            assert_eq!(info.last_changed_date.as_deref(), Some("2024-03-01 10:00:00"));
        }
    }
}
