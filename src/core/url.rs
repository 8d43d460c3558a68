//! Route path type for type-safe URL path handling.
//!
//! A [`RoutePath`] stores exactly what the build pipeline or the redirect
//! configuration supplied. Nothing is normalized at construction: a redirect
//! source keeps its author-specified form (slashed or unslashed), and
//! trailing-slash policy is applied explicitly and only to rule targets.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Site-relative URL path, stored verbatim.
///
/// Cheap to clone; comparisons and hashing are byte-exact, so `/a` and `/a/`
/// are distinct paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath(Arc<str>);

impl RoutePath {
    /// Wrap a path string without modifying it.
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    /// Get the path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RoutePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoutePath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RoutePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for RoutePath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for RoutePath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for RoutePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RoutePath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(s))
    }
}

// ============================================================================
// Pathname validation
// ============================================================================

/// Why a path is not a usable site-relative pathname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathnameIssue {
    Empty,
    NoLeadingSlash,
    ProtocolRelative,
    HasScheme,
    HasQuery,
    HasFragment,
}

impl fmt::Display for PathnameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Empty => "path is empty",
            Self::NoLeadingSlash => "path must start with `/`",
            Self::ProtocolRelative => "protocol-relative URLs (`//...`) are not site paths",
            Self::HasScheme => "absolute URLs with a scheme are not site paths",
            Self::HasQuery => "path must not carry a query string",
            Self::HasFragment => "path must not carry a fragment",
        };
        f.write_str(text)
    }
}

/// Check that a path is a syntactically valid site-relative pathname:
/// a single leading `/`, no scheme, no query string, no fragment.
///
/// # Examples
/// ```ignore
/// assert!(check_site_relative("/docs/intro").is_ok());
/// assert!(check_site_relative("https://example.com/").is_err());
/// assert!(check_site_relative("/docs?v=1").is_err());
/// ```
pub fn check_site_relative(path: &str) -> Result<(), PathnameIssue> {
    if path.is_empty() {
        return Err(PathnameIssue::Empty);
    }
    if has_scheme(path) {
        return Err(PathnameIssue::HasScheme);
    }
    if path.starts_with("//") {
        return Err(PathnameIssue::ProtocolRelative);
    }
    if !path.starts_with('/') {
        return Err(PathnameIssue::NoLeadingSlash);
    }
    if path.contains('?') {
        return Err(PathnameIssue::HasQuery);
    }
    if path.contains('#') {
        return Err(PathnameIssue::HasFragment);
    }
    Ok(())
}

/// Check if a string carries a URL scheme (`https:`, `mailto:`, ...).
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
fn has_scheme(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
