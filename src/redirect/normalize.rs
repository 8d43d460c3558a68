//! Trailing-slash normalization of redirect targets.
//!
//! Targets are compared against the real route set in the site's canonical
//! form, so the policy runs before validation. Sources are never rewritten:
//! a redirect answers whatever legacy form the author asked for, slashed or
//! not.

use std::borrow::Cow;

use super::Candidate;
use crate::config::TrailingSlash;
use crate::core::RoutePath;

/// Apply the trailing-slash policy to a single path. The root `/` is left
/// alone under every policy.
pub fn apply_trailing_slash(path: &str, policy: TrailingSlash) -> Cow<'_, str> {
    match policy {
        TrailingSlash::Preserve => Cow::Borrowed(path),
        TrailingSlash::Always => {
            if path.ends_with('/') {
                Cow::Borrowed(path)
            } else {
                Cow::Owned(format!("{path}/"))
            }
        }
        TrailingSlash::Never => match path.strip_suffix('/') {
            Some(stem) if !stem.is_empty() => Cow::Owned(stem.to_string()),
            _ => Cow::Borrowed(path),
        },
    }
}

/// Rewrite every candidate's target in place.
pub(crate) fn normalize_targets(candidates: &mut [Candidate], policy: TrailingSlash) {
    if policy == TrailingSlash::Preserve {
        return;
    }

    for candidate in candidates {
        if let Cow::Owned(normalized) = apply_trailing_slash(candidate.rule.to.as_str(), policy) {
            candidate.rule.to = RoutePath::new(normalized);
        }
    }
}
