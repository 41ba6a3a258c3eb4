//! Import path resolution.
//!
//! # Responsibilities
//! - Decide whether a request path falls under the import root
//! - Substitute wildcard segments into both roots
//! - Split off the sub-package suffix beyond the matched root
//!
//! # Design Decisions
//! - Prefix matching only, on whole path segments
//! - An exact hit on a wildcard root cannot name a repository, so it
//!   resolves to a plain redirect instead of a discovery page
//! - Paths below the root must be clean: an empty, `.` or `..` segment
//!   never matches, in either mode

use std::borrow::Cow;
use std::str::Utf8Error;

use percent_encoding::percent_decode_str;

/// The configured `import root → repository root` mapping.
///
/// Neither root ends with `/`. When `wildcard_depth` is non-zero, that many
/// request path segments following the import root are appended to both
/// roots on each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMapping {
    import_root: String,
    repo_root: String,
    wildcard_depth: usize,
}

impl ImportMapping {
    /// Create a mapping from already-normalized roots.
    pub fn new(
        import_root: impl Into<String>,
        repo_root: impl Into<String>,
        wildcard_depth: usize,
    ) -> Self {
        Self {
            import_root: import_root.into(),
            repo_root: repo_root.into(),
            wildcard_depth,
        }
    }

    pub fn import_root(&self) -> &str {
        &self.import_root
    }

    pub fn repo_root(&self) -> &str {
        &self.repo_root
    }

    pub fn wildcard_depth(&self) -> usize {
        self.wildcard_depth
    }

    /// Host portion of the import root (everything before the first `/`).
    pub fn host(&self) -> &str {
        self.import_root
            .split_once('/')
            .map_or(self.import_root.as_str(), |(host, _)| host)
    }

    /// Normalized path of the diagnostic endpoint.
    pub fn ping_path(&self) -> String {
        format!("{}/.ping", self.import_root)
    }

    /// Returns true if the normalized path addresses the diagnostic endpoint.
    pub fn is_ping(&self, path: &str) -> bool {
        let ping = self.ping_path();
        path == ping
            || path
                .strip_prefix(ping.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Effective roots for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub import_root: String,
    pub repo_root: String,
    /// Remainder of the path below `import_root`; empty or starting with `/`.
    pub suffix: String,
}

/// Outcome of matching a request against the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Serve the discovery page for these roots.
    Render(Resolved),
    /// The bare wildcard root was requested; redirect to the repository root.
    RedirectToRepo(&'a str),
    /// The path lies outside the import root.
    NoMatch,
}

/// Percent-decode a raw URL path. `%2F` becomes a segment separator.
pub fn decode_request_path(raw: &str) -> Result<Cow<'_, str>, Utf8Error> {
    percent_decode_str(raw).decode_utf8()
}

/// Returns true unless `segment` is empty, `.` or `..`.
fn is_clean_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

/// Empty, or `/` followed by clean segments.
fn is_clean_suffix(suffix: &str) -> bool {
    suffix.is_empty()
        || suffix
            .strip_prefix('/')
            .is_some_and(|rest| rest.split('/').all(is_clean_segment))
}

/// Join host and URL path and drop a single trailing `/`.
pub fn normalize_request_path(host: &str, path: &str) -> String {
    let mut full = String::with_capacity(host.len() + path.len());
    full.push_str(host);
    full.push_str(path);
    if full.ends_with('/') {
        full.pop();
    }
    full
}

/// Resolve a normalized request path (see [`normalize_request_path`]).
pub fn resolve<'a>(mapping: &'a ImportMapping, path: &str) -> Resolution<'a> {
    let root = mapping.import_root.as_str();

    if mapping.wildcard_depth == 0 {
        return match path.strip_prefix(root) {
            Some(suffix) if is_clean_suffix(suffix) => {
                Resolution::Render(Resolved {
                    import_root: mapping.import_root.clone(),
                    repo_root: mapping.repo_root.clone(),
                    suffix: suffix.to_string(),
                })
            }
            _ => Resolution::NoMatch,
        };
    }

    if path == root {
        return Resolution::RedirectToRepo(&mapping.repo_root);
    }

    let Some(rest) = path.strip_prefix(root).and_then(|p| p.strip_prefix('/')) else {
        return Resolution::NoMatch;
    };

    let segments: Vec<&str> = rest.split('/').collect();
    if segments.len() < mapping.wildcard_depth {
        return Resolution::NoMatch;
    }

    let (wild, tail) = segments.split_at(mapping.wildcard_depth);
    if !segments.iter().all(|s| is_clean_segment(s)) {
        return Resolution::NoMatch;
    }

    let elem = wild.join("/");
    let suffix = if tail.is_empty() {
        String::new()
    } else {
        format!("/{}", tail.join("/"))
    };

    Resolution::Render(Resolved {
        import_root: format!("{}/{}", mapping.import_root, elem),
        repo_root: format!("{}/{}", mapping.repo_root, elem),
        suffix,
    })
}
