//! Explicit rule expansion.

use super::{Candidate, Origin, RedirectRule};
use crate::config::ExplicitRedirect;

/// Flatten configured rules into candidates, declaration order preserved.
/// A rule with several sources expands into one candidate per source, all
/// pointing at the same target.
pub(crate) fn rule_candidates(rules: &[ExplicitRedirect]) -> Vec<Candidate> {
    rules
        .iter()
        .enumerate()
        .flat_map(|(i, rule)| {
            rule.from.iter().map(move |from| {
                Candidate::new(RedirectRule::new(from, rule.to.as_str()), Origin::Rule(i))
            })
        })
        .collect()
}
