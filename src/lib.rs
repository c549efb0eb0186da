//! review-board: audit review workbooks stored in Subversion
//!
//! Walks one or more repository roots for `.xlsx` review documents, pulls the
//! review score and reviewed version out of each, and writes a consolidated
//! workbook with a detail sheet and a score distribution overview.

pub mod audit;
pub mod cli;
pub mod config;
pub mod domain;
pub mod extract;
pub mod fetch;
pub mod render;
pub mod scan;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
