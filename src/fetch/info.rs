//! Parsing of `svn info` output

use serde::Serialize;

/// Revision details for a single repository path. Fields missing from the
/// info output stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathInfo {
    pub revision: Option<String>,
    pub last_changed_revision: Option<String>,
    pub last_changed_date: Option<String>,
}

/// Extract `Revision`, `Last Changed Rev` and `Last Changed Date` from
/// line-oriented `Key: value` text.
///
/// The date keeps its first two whitespace-separated tokens, so
/// `2024-03-01 10:15:00 +0100 (Fri, 01 Mar 2024)` becomes `2024-03-01 10:15:00`.
pub fn parse_info(text: &str) -> PathInfo {
    let mut info = PathInfo::default();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim_end() {
            "Revision" => info.revision = Some(value.to_string()),
            "Last Changed Rev" => info.last_changed_revision = Some(value.to_string()),
            "Last Changed Date" => {
                let parts: Vec<&str> = value.split_whitespace().collect();
                let date = if parts.len() >= 2 {
                    format!("{} {}", parts[0], parts[1])
                } else {
                    value.to_string()
                };
                info.last_changed_date = Some(date);
            }
            _ => {}
        }
    }
    info
}
