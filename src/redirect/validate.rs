//! Candidate validation.
//!
//! Two checks, both batched: every candidate's source and target must be
//! syntactically valid site-relative pathnames, and every target must name a
//! route the finished build actually serves. Redirecting to a page that does
//! not exist is always a configuration bug, never silently tolerated.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{Candidate, error::RedirectDiagnostics};
use crate::core::check_site_relative;
use crate::utils::plural_count;

pub(crate) fn validate_candidates(
    candidates: &[Candidate],
    route_set: &FxHashSet<&str>,
    base_url: &str,
    diags: &mut RedirectDiagnostics,
) {
    check_pathnames(candidates, diags);
    check_targets_exist(candidates, route_set, base_url, diags);
}

/// Syntax check on both ends of every candidate. Sources come out of the
/// creator or explicit rules verbatim, so this is where scheme-carrying and
/// query-carrying paths are caught.
fn check_pathnames(candidates: &[Candidate], diags: &mut RedirectDiagnostics) {
    for candidate in candidates {
        if let Err(issue) = check_site_relative(candidate.rule.from.as_str()) {
            diags.error(
                candidate.origin.to_string(),
                format!("source `{}`: {}", candidate.rule.from, issue),
            );
        }
        if let Err(issue) = check_site_relative(candidate.rule.to.as_str()) {
            diags.error(
                candidate.origin.to_string(),
                format!("target `{}`: {}", candidate.rule.to, issue),
            );
        }
    }
}

/// Every (syntactically valid) target must be in the route set. Bad targets
/// are grouped so each missing path is reported once, with every rule that
/// references it.
fn check_targets_exist(
    candidates: &[Candidate],
    route_set: &FxHashSet<&str>,
    base_url: &str,
    diags: &mut RedirectDiagnostics,
) {
    let mut order: Vec<&str> = Vec::new();
    let mut referrers: FxHashMap<&str, Vec<&Candidate>> = FxHashMap::default();

    for candidate in candidates {
        let to = candidate.rule.to.as_str();
        if check_site_relative(to).is_err() || route_set.contains(to) {
            continue;
        }
        let entry = referrers.entry(to).or_default();
        if entry.is_empty() {
            order.push(to);
        }
        entry.push(candidate);
    }

    for to in order {
        let sources = referrers[to]
            .iter()
            .map(|c| format!("`{}` ({})", c.rule.from, c.origin))
            .collect::<Vec<_>>()
            .join(", ");
        diags.error_with_hint(
            to,
            format!("not a route in the finished build; redirected to from {sources}"),
            format!(
                "targets must match a served route exactly ({} under base url `{}`)",
                plural_count(route_set.len(), "route"),
                base_url
            ),
        );
    }
}
