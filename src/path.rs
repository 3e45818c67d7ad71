//! Page path type for nav-target matching.
//!
//! - Internal representation: always decoded (human-readable)
//! - Browser boundary: decode on input
//!
//! Nav links declare their targets as bare file names (`about.html`), so the
//! interesting projection of a path is its final segment.

use std::sync::Arc;

/// Decoded path of the currently shown page.
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Query string and fragment are stripped at construction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PagePath(Arc<str>);

impl PagePath {
    /// Create from a browser-reported path (decode percent-encoding, strip
    /// query string and fragment).
    pub fn from_browser(encoded: &str) -> Self {
        use percent_encoding::percent_decode_str;
        let path = encoded.split(['?', '#']).next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());

        let trimmed = decoded.trim();
        if trimmed.is_empty() {
            return Self(Arc::from("/"));
        }

        let normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        Self(Arc::from(normalized))
    }

    /// Get the decoded path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment: the page's file name.
    ///
    /// Empty for the site root and for directory-style paths with a trailing
    /// slash, which nav matching normalizes to the canonical home target.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// Whether this path addresses the site root.
    pub fn is_root(&self) -> bool {
        self.file_name().is_empty()
    }
}

impl std::fmt::Display for PagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for PagePath {
    fn default() -> Self {
        Self(Arc::from("/"))
    }
}
