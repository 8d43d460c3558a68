//! Extension-derived redirect candidates.
//!
//! Sites migrating away from (or to) file-style URLs keep old links alive by
//! pairing every route with its `.ext` variant: `from_extensions` redirects
//! `/a.html` to the real route `/a`, `to_extensions` redirects `/a` to the
//! real route `/a.html`.

use super::{Candidate, Origin, RedirectRule};
use crate::core::RoutePath;

/// One candidate per (eligible route, extension): `/a.<ext>` -> `/a`.
///
/// Directory-style routes (trailing `/`) have no file-style alias, and a
/// route already carrying one of the extensions would alias onto itself.
pub(crate) fn from_extension_candidates(
    routes: &[RoutePath],
    extensions: &[String],
) -> Vec<Candidate> {
    if extensions.is_empty() {
        return Vec::new();
    }

    routes
        .iter()
        .filter(|route| {
            let path = route.as_str();
            !path.is_empty() && !path.ends_with('/') && !ends_with_any(path, extensions)
        })
        .flat_map(|route| {
            extensions.iter().map(move |ext| {
                Candidate::new(
                    RedirectRule::new(format!("{route}.{ext}"), route.clone()),
                    Origin::FromExtensions,
                )
            })
        })
        .collect()
}

/// One candidate per route carrying a configured extension: `/a` -> `/a.<ext>`.
///
/// The first matching extension (configuration order) determines the
/// stripped source; routes without a matching extension yield nothing.
pub(crate) fn to_extension_candidates(
    routes: &[RoutePath],
    extensions: &[String],
) -> Vec<Candidate> {
    routes
        .iter()
        .filter_map(|route| {
            extensions
                .iter()
                .find_map(|ext| route.as_str().strip_suffix(&format!(".{ext}")))
                .map(|stem| {
                    Candidate::new(
                        RedirectRule::new(stem, route.clone()),
                        Origin::ToExtensions,
                    )
                })
        })
        .collect()
}

fn ends_with_any(path: &str, extensions: &[String]) -> bool {
    extensions
        .iter()
        .any(|ext| path.ends_with(&format!(".{ext}")))
}
