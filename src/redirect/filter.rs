//! Shadow filtering and duplicate resolution.
//!
//! A redirect must never shadow a real, independently reachable page, and a
//! source path can only redirect to one destination. Both rules are applied
//! over the validated candidate list in first-seen order.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{Candidate, RedirectRule, error::RedirectDiagnostics};
use crate::config::DuplicateHandling;
use crate::core::RoutePath;

/// What the filter kept and what it dropped. Dropped candidates are handed
/// back so the caller decides how loudly to report them.
#[derive(Debug, Default)]
pub(crate) struct FilterOutcome {
    /// Final rules, first-seen order.
    pub rules: Vec<RedirectRule>,
    /// Candidates whose source is a real route.
    pub shadowed: Vec<Candidate>,
    /// Candidates whose source repeats an earlier candidate.
    pub superseded: Vec<Candidate>,
}

pub(crate) fn filter_candidates(
    candidates: Vec<Candidate>,
    route_set: &FxHashSet<&str>,
    on_duplicate: DuplicateHandling,
    diags: &mut RedirectDiagnostics,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let mut kept: FxHashMap<RoutePath, RoutePath> = FxHashMap::default();

    for candidate in candidates {
        if route_set.contains(candidate.rule.from.as_str()) {
            outcome.shadowed.push(candidate);
            continue;
        }

        match kept.get(candidate.rule.from.as_str()) {
            Some(first_to) => {
                if on_duplicate == DuplicateHandling::Error && *first_to != candidate.rule.to {
                    diags.error_with_hint(
                        candidate.origin.to_string(),
                        format!(
                            "`{}` already redirects to `{}`, cannot also redirect to `{}`",
                            candidate.rule.from, first_to, candidate.rule.to
                        ),
                        "set on_duplicate = \"first-wins\" to keep the first rule",
                    );
                }
                outcome.superseded.push(candidate);
            }
            None => {
                kept.insert(candidate.rule.from.clone(), candidate.rule.to.clone());
                outcome.rules.push(candidate.rule);
            }
        }
    }

    outcome
}
