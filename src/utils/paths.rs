//! Repository path helpers

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched by [`encode_url`]: RFC 3986 unreserved plus `:` and `/`.
const URL_SAFE: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~').remove(b':').remove(b'/');

/// Percent-encode a repository URL so it survives as a single argument to the
/// svn client. Spaces, brackets and non-ASCII bytes are escaped; `:` and `/` are not.
pub fn encode_url(path: &str) -> String {
    utf8_percent_encode(path, URL_SAFE).to_string()
}

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and drop trailing separators
    let normalized = path.replace('\\', "/");
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() {
        normalized
    } else {
        trimmed.to_string()
    }
}

/// Join a listed child name onto its parent, collapsing the separator.
pub fn join_child(parent: &str, child: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), child.trim_end_matches('/'))
}

pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Name of the directory directly containing `path`, or `""` at the top level.
pub fn folder_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent.rsplit('/').next().unwrap_or(""),
        None => "",
    }
}
