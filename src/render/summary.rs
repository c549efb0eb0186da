//! JSON run summary generation.

use super::model::ReportModel;
use crate::domain::{AuditOutcome, SUMMARY_SCHEMA_VERSION};
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

pub fn write_summary(
    summary_path: &Path,
    report_path: &Path,
    outcome: &AuditOutcome,
    model: &ReportModel,
    include_timestamp: bool,
) -> Result<()> {
    let mut failures = outcome.failures.clone();
    failures.sort_by(|a, b| a.path.cmp(&b.path));

    let bins = model
        .overview
        .iter()
        .map(|row| json!({ "label": row.label, "count": row.count, "percentage": row.percentage }))
        .collect::<Vec<_>>();

    let mut summary = Map::new();
    summary
        .insert("schema_version".to_string(), Value::String(SUMMARY_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        summary.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    summary.insert("report".to_string(), Value::String(report_path.display().to_string()));
    summary.insert(
        "totals".to_string(),
        json!({
            "documents_found": outcome.documents_found,
            "records": outcome.records.len(),
            "scored": model.scored,
            "unscored": model.unscored,
            "failed": model.failed,
        }),
    );
    summary.insert("bins".to_string(), Value::Array(bins));
    if !failures.is_empty() {
        summary.insert("failures".to_string(), serde_json::to_value(failures)?);
    }

    if let Some(parent) = summary_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(summary_path, serde_json::to_string_pretty(&Value::Object(summary))?)
        .with_context(|| format!("Failed writing summary {}", summary_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_summary;
    use crate::domain::{default_score_bins, AuditOutcome, DocumentFailure, FailureStage};
    use crate::render::ReportModel;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn summary_lists_totals_bins_and_failures() {
        let tmp = TempDir::new().expect("tmp");
        let summary_path = tmp.path().join("summary.json");
        let outcome = AuditOutcome {
            documents_found: 1,
            records: Vec::new(),
            failures: vec![DocumentFailure {
                path: "https://svn/r/a.xlsx".to_string(),
                stage: FailureStage::Extract,
                reason: "worksheet 'DR-SW' not found".to_string(),
            }],
        };
        let model = ReportModel::build(&outcome, &default_score_bins());

        write_summary(&summary_path, Path::new("board.xlsx"), &outcome, &model, false)
            .expect("write summary");

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(summary_path).expect("read")).expect("json");
        assert!(parsed.get("generated_at").is_none());
        assert_eq!(parsed["totals"]["failed"], json!(1));
        assert_eq!(parsed["totals"]["documents_found"], json!(1));
        assert_eq!(parsed["bins"][0]["percentage"], json!("0.00%"));
        assert_eq!(parsed["failures"][0]["stage"], json!("extract"));
    }
}
