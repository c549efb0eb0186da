//! Utility functions

pub mod dates;
pub mod paths;

pub use dates::parse_changed_date;
pub use paths::{encode_url, file_name, folder_name, join_child, normalize_path};
