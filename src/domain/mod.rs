//! Core data types shared across the audit pipeline

pub mod config;
pub mod record;

pub use config::{bin_index, default_score_bins, ClassificationRule, Config, ScoreBin};
pub use record::{AuditOutcome, DocumentFailure, DocumentRecord, FailureStage};

/// Version tag written into the JSON run summary.
pub const SUMMARY_SCHEMA_VERSION: &str = "1";
