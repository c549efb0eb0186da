//! Per-document audit results

use serde::Serialize;
use std::fmt;

/// One successfully processed review document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub path: String,
    pub file_name: String,
    pub folder_name: String,
    pub classification: String,
    pub actual_version_reviewed: Option<String>,
    /// Fraction in `[0, 1]`
    pub review_score: Option<f64>,
    pub last_changed_revision: String,
    pub last_changed_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Fetch,
    Extract,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Fetch => f.write_str("fetch"),
            FailureStage::Extract => f.write_str("extract"),
        }
    }
}

/// A document path that produced no record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentFailure {
    pub path: String,
    pub stage: FailureStage,
    pub reason: String,
}

/// Records and failures collected over one or more roots.
#[derive(Debug, Clone, Default)]
pub struct AuditOutcome {
    pub documents_found: usize,
    pub records: Vec<DocumentRecord>,
    pub failures: Vec<DocumentFailure>,
}

impl AuditOutcome {
    pub fn merge(&mut self, other: AuditOutcome) {
        self.documents_found += other.documents_found;
        self.records.extend(other.records);
        self.failures.extend(other.failures);
    }
}
