//! Repository access (svn list / cat / info)

pub mod info;
pub mod svn;

pub use info::{parse_info, PathInfo};
pub use svn::{SvnClient, SvnError};

/// Read-only view of a versioned repository.
///
/// Implementations never fail outward: an unreachable path lists as empty,
/// fetches as `None`, and has no metadata. Diagnostics are logged at the point
/// of failure.
pub trait RepositoryClient: Sync {
    /// Child entry names of `path`. Directories carry a trailing `/`.
    fn list(&self, path: &str) -> Vec<String>;

    /// Raw bytes of the file at `path`.
    fn fetch(&self, path: &str) -> Option<Vec<u8>>;

    fn metadata(&self, path: &str) -> Option<PathInfo>;
}
