//! Fixtures shared by unit tests.

use crate::fetch::{PathInfo, RepositoryClient};
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub enum ScoreCell<'a> {
    Number(f64),
    Text(&'a str),
    Empty,
}

/// Build an in-memory review workbook with the score in J2 and the version in K7.
pub fn review_workbook(sheet: &str, score: ScoreCell<'_>, version: Option<&str>) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("sheet name");
    worksheet.write_string(0, 0, "Design Review").expect("title");
    match score {
        ScoreCell::Number(value) => {
            worksheet.write_number(1, 9, value).expect("score");
        }
        ScoreCell::Text(text) => {
            worksheet.write_string(1, 9, text).expect("score");
        }
        ScoreCell::Empty => {}
    }
    if let Some(version) = version {
        worksheet.write_string(6, 10, version).expect("version");
    }
    workbook.save_to_buffer().expect("workbook bytes")
}

/// In-memory repository keyed by full path.
#[derive(Default)]
pub struct MemoryRepository {
    pub listings: HashMap<String, Vec<String>>,
    pub files: HashMap<String, Vec<u8>>,
    pub infos: HashMap<String, PathInfo>,
    pub fetches: AtomicUsize,
}

impl MemoryRepository {
    pub fn with_dir(mut self, path: &str, children: &[&str]) -> Self {
        self.listings.insert(path.to_string(), children.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_file(mut self, path: &str, bytes: Vec<u8>, changed: Option<(&str, &str)>) -> Self {
        self.files.insert(path.to_string(), bytes);
        if let Some((rev, date)) = changed {
            self.infos.insert(
                path.to_string(),
                PathInfo {
                    revision: Some("100".to_string()),
                    last_changed_revision: Some(rev.to_string()),
                    last_changed_date: Some(date.to_string()),
                },
            );
        }
        self
    }
}

impl RepositoryClient for MemoryRepository {
    fn list(&self, path: &str) -> Vec<String> {
        self.listings.get(path).cloned().unwrap_or_default()
    }

    fn fetch(&self, path: &str) -> Option<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.files.get(path).cloned()
    }

    fn metadata(&self, path: &str) -> Option<PathInfo> {
        self.infos.get(path).cloned()
    }
}
