//! Review workbook field extraction
//!
//! Reads two cells from a fixed worksheet of an `.xlsx` review document: the
//! version that was reviewed and the overall review score. Only cached cell
//! values are read; formulas are never evaluated.

use crate::domain::Config;
use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx, XlsxError};
use std::io::Cursor;
use thiserror::Error;

pub mod cell;
pub mod score;

pub use cell::{CellRef, CellRefError};
pub use score::{parse_score, ScoreParse};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not a readable workbook: {0}")]
    Open(#[from] XlsxError),

    #[error("worksheet '{0}' not found")]
    MissingSheet(String),

    #[error("failed reading worksheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: XlsxError,
    },

    #[error("review score '{0}' is not a number")]
    Score(String),
}

/// Where the review fields live inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub version_cell: CellRef,
    pub score_cell: CellRef,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: "DR-SW".to_string(),
            version_cell: CellRef { row: 6, col: 10 },
            score_cell: CellRef { row: 1, col: 9 },
        }
    }
}

impl SheetLayout {
    pub fn from_config(config: &Config) -> Result<Self, CellRefError> {
        Ok(Self {
            sheet_name: config.sheet_name.clone(),
            version_cell: CellRef::parse(&config.version_cell)?,
            score_cell: CellRef::parse(&config.score_cell)?,
        })
    }
}

/// The two values pulled out of one review document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFields {
    pub actual_version_reviewed: Option<String>,
    /// Fraction in `[0, 1]`
    pub review_score: Option<f64>,
}

/// Extract the review fields from raw workbook bytes.
///
/// Either both fields are read or the document is rejected: a missing sheet,
/// an unreadable workbook or a malformed score all return an error.
pub fn extract_review(bytes: &[u8], layout: &SheetLayout) -> Result<ReviewFields, ExtractError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    if !workbook.sheet_names().iter().any(|name| name == &layout.sheet_name) {
        return Err(ExtractError::MissingSheet(layout.sheet_name.clone()));
    }
    let range = workbook
        .worksheet_range(&layout.sheet_name)
        .map_err(|source| ExtractError::Sheet { sheet: layout.sheet_name.clone(), source })?;

    let actual_version_reviewed = cell_text(&range, layout.version_cell);
    let review_score = match cell_text(&range, layout.score_cell) {
        None => None,
        Some(text) => match parse_score(&text) {
            ScoreParse::Score(value) => Some(value),
            ScoreParse::Absent => None,
            ScoreParse::Invalid => return Err(ExtractError::Score(text)),
        },
    };

    Ok(ReviewFields { actual_version_reviewed, review_score })
}

/// Trimmed display text of a cell; empty, error and missing cells are `None`.
fn cell_text(range: &Range<Data>, cell: CellRef) -> Option<String> {
    let text = match range.get_value(cell.as_tuple())? {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}
