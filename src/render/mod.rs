//! Output rendering (report workbook, JSON summary, preview)

pub mod model;
pub mod preview;
pub mod summary;
pub mod workbook;

pub use model::{DetailRow, OverviewRow, ReportModel};
pub use preview::{NoPreview, PreviewHook, SystemViewer};
pub use summary::write_summary;
pub use workbook::{render_workbook, write_workbook};
