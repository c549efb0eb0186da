//! Concurrent document processing
//!
//! Every discovered document is fetched, extracted and looked up on a bounded
//! worker pool. Documents that cannot be fetched or parsed are dropped from the
//! report but counted as failures so callers can surface them.

use crate::domain::{
    AuditOutcome, ClassificationRule, Config, DocumentFailure, DocumentRecord, FailureStage,
};
use crate::extract::{extract_review, SheetLayout};
use crate::fetch::RepositoryClient;
use crate::scan::{walk_documents, WalkOptions};
use crate::utils::{file_name, folder_name};
use anyhow::{Context, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

/// Settings for the fan-out stage.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    pub layout: SheetLayout,
    pub classification: ClassificationRule,
    /// Pool size; `None` lets rayon pick from the available parallelism
    pub worker_count: Option<usize>,
}

impl AuditOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            layout: SheetLayout::from_config(config).context("Invalid review cell layout")?,
            classification: config.classification.clone(),
            worker_count: config.worker_count,
        })
    }
}

/// Walk every configured root and audit the documents found under it.
pub fn run_audit<C: RepositoryClient>(client: &C, config: &Config) -> Result<AuditOutcome> {
    let walk_options = WalkOptions::from_config(config)?;
    let audit_options = AuditOptions::from_config(config)?;

    let mut outcome = AuditOutcome::default();
    for root in &config.roots {
        let (paths, _stats) = walk_documents(client, root, &walk_options);
        outcome.merge(audit_documents(client, &paths, &audit_options));
    }
    Ok(outcome)
}

/// Process `paths` concurrently, one task per document.
pub fn audit_documents<C: RepositoryClient>(
    client: &C,
    paths: &[String],
    options: &AuditOptions,
) -> AuditOutcome {
    let process = || -> Vec<Result<DocumentRecord, DocumentFailure>> {
        paths.par_iter().map(|path| audit_document(client, path, options)).collect()
    };

    let results = match ThreadPoolBuilder::new()
        .num_threads(options.worker_count.unwrap_or(0))
        .thread_name(|idx| format!("review-board-worker-{idx}"))
        .build()
    {
        Ok(pool) => pool.install(process),
        Err(err) => {
            tracing::warn!("Failed to build worker pool ({}); using the global pool", err);
            process()
        }
    };

    let mut outcome = AuditOutcome { documents_found: paths.len(), ..AuditOutcome::default() };
    for result in results {
        match result {
            Ok(record) => outcome.records.push(record),
            Err(failure) => outcome.failures.push(failure),
        }
    }
    tracing::info!(
        "Audited {} documents: {} records, {} failures",
        outcome.documents_found,
        outcome.records.len(),
        outcome.failures.len()
    );
    outcome
}

fn audit_document<C: RepositoryClient>(
    client: &C,
    path: &str,
    options: &AuditOptions,
) -> Result<DocumentRecord, DocumentFailure> {
    let Some(bytes) = client.fetch(path) else {
        tracing::warn!("Skipping '{}': file could not be retrieved", path);
        return Err(DocumentFailure {
            path: path.to_string(),
            stage: FailureStage::Fetch,
            reason: "file could not be retrieved".to_string(),
        });
    };

    let fields = extract_review(&bytes, &options.layout).map_err(|err| {
        tracing::warn!("Skipping '{}': {}", path, err);
        DocumentFailure {
            path: path.to_string(),
            stage: FailureStage::Extract,
            reason: err.to_string(),
        }
    })?;

    let info = client.metadata(path).unwrap_or_default();
    Ok(DocumentRecord {
        path: path.to_string(),
        file_name: file_name(path).to_string(),
        folder_name: folder_name(path).to_string(),
        classification: options.classification.classify(path).to_string(),
        actual_version_reviewed: fields.actual_version_reviewed,
        review_score: fields.review_score,
        last_changed_revision: info.last_changed_revision.unwrap_or_default(),
        last_changed_date: info.last_changed_date.unwrap_or_default(),
    })
}
