//! Presentation model for the review report.
//!
//! All sorting, formatting and binning happens here so the workbook writer
//! only has to place cells.

use crate::domain::{bin_index, AuditOutcome, DocumentRecord, ScoreBin};
use crate::utils::parse_changed_date;
use chrono::NaiveDate;
use std::cmp::Ordering;

pub const NOT_AVAILABLE: &str = "N/A";

/// One line of the detail sheet, already rendered to text.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub path: String,
    pub version: String,
    pub date: String,
    pub file_name: String,
    pub folder_name: String,
    pub classification: String,
    pub revision: String,
    pub score: String,
    /// Index into the score bins for coloring, `None` when unscored
    pub band: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewRow {
    pub label: String,
    pub count: usize,
    pub percentage: String,
}

#[derive(Debug, Clone)]
pub struct ReportModel {
    pub bins: Vec<ScoreBin>,
    pub details: Vec<DetailRow>,
    pub overview: Vec<OverviewRow>,
    /// Records that landed in a bin
    pub scored: usize,
    /// Records without a score, or with one outside every bin
    pub unscored: usize,
    /// `unscored` as a share of all records, so it reconciles with the bin
    /// percentages (which are over scored records only)
    pub unscored_percentage: String,
    pub failed: usize,
}

impl ReportModel {
    pub fn build(outcome: &AuditOutcome, bins: &[ScoreBin]) -> Self {
        let mut dated: Vec<(&DocumentRecord, Option<NaiveDate>)> = outcome
            .records
            .iter()
            .map(|record| (record, parse_changed_date(&record.last_changed_date)))
            .collect();
        dated.sort_by(|(a, a_date), (b, b_date)| {
            newest_first(a_date, b_date).then_with(|| a.path.cmp(&b.path))
        });

        let details: Vec<DetailRow> =
            dated.into_iter().map(|(record, date)| detail_row(record, date, bins)).collect();

        let mut counts = vec![0usize; bins.len()];
        for band in details.iter().filter_map(|row| row.band) {
            counts[band] += 1;
        }
        let scored: usize = counts.iter().sum();

        let overview = bins
            .iter()
            .zip(&counts)
            .map(|(bin, &count)| OverviewRow {
                label: bin.label.clone(),
                count,
                percentage: format_percentage(count, scored),
            })
            .collect();

        Self {
            bins: bins.to_vec(),
            unscored: details.len() - scored,
            unscored_percentage: format_percentage(details.len() - scored, details.len()),
            details,
            overview,
            scored,
            failed: outcome.failures.len(),
        }
    }
}

/// Dated rows first, most recent at the top.
fn newest_first(a: &Option<NaiveDate>, b: &Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn detail_row(record: &DocumentRecord, date: Option<NaiveDate>, bins: &[ScoreBin]) -> DetailRow {
    let score = format_score(record.review_score);
    let band = score_percent(&score).and_then(|percent| bin_index(bins, percent));
    DetailRow {
        path: record.path.clone(),
        version: record
            .actual_version_reviewed
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        date: date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        file_name: record.file_name.clone(),
        folder_name: record.folder_name.clone(),
        classification: record.classification.clone(),
        revision: record.last_changed_revision.clone(),
        score,
        band,
    }
}

/// `0.975` -> `97.50%`; absent -> `N/A`.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(fraction) => format!("{:.2}%", fraction * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Read a rendered score cell back as a percentage.
pub fn score_percent(text: &str) -> Option<f64> {
    text.strip_suffix('%')?.trim().parse().ok()
}

fn format_percentage(count: usize, total: usize) -> String {
    let percentage = if total > 0 { count as f64 / total as f64 * 100.0 } else { 0.0 };
    format!("{percentage:.2}%")
}
