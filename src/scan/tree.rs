//! Iterative repository tree walk.

use super::{ScanStats, WalkOptions};
use crate::fetch::RepositoryClient;
use crate::utils::{join_child, normalize_path};

/// Collect every document path below `root`.
///
/// Uses an explicit stack, so discovery order is depth-first with the most
/// recently listed directory expanded next. Callers must not depend on that
/// order. There is no cycle detection and no depth limit.
pub fn walk_documents<C: RepositoryClient + ?Sized>(
    client: &C,
    root: &str,
    options: &WalkOptions,
) -> (Vec<String>, ScanStats) {
    let mut stats = ScanStats::default();
    let mut documents = Vec::new();
    let mut pending = vec![normalize_path(root)];

    while let Some(current) = pending.pop() {
        stats.directories_listed += 1;
        for name in client.list(&current) {
            let child = join_child(&current, &name);
            if options.is_excluded(&child) {
                tracing::debug!("Excluded {}", child);
                stats.entries_excluded += 1;
                continue;
            }
            if name.ends_with('/') {
                pending.push(child);
            } else if options.is_document(&name) {
                documents.push(child);
            }
        }
    }

    stats.documents_found = documents.len();
    tracing::info!(
        "Found {} documents under {} ({} directories listed)",
        stats.documents_found,
        root,
        stats.directories_listed
    );
    (documents, stats)
}
