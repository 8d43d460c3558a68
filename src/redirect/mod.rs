//! Redirect rule collection.
//!
//! Combines the configured generation strategies into the final redirect
//! rule list for one build, in four forward-only stages:
//!
//! ```text
//! strategies          extension-derived, explicit rules, creator
//!    │
//! normalize           trailing-slash policy applied to targets
//!    │
//! validate            pathname syntax + target must be a real route
//!    │
//! filter              drop sources shadowing real routes, resolve duplicates
//! ```
//!
//! Validation failures abort the whole pass with an aggregated
//! [`RedirectDiagnostics`] report; there is no partial output.

mod creator;
mod error;
mod explicit;
mod extension;
mod filter;
mod normalize;
mod validate;

pub use error::{RedirectDiagnostic, RedirectDiagnostics};
pub use normalize::apply_trailing_slash;

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{RedirectsSection, TrailingSlash};
use crate::core::RoutePath;
use crate::utils::plural_count;
use crate::{debug, log};

// ============================================================================
// Types
// ============================================================================

/// A planned redirect: requests for `from` are answered by `to`.
///
/// In the final rule list `from` never coincides with a real route and is
/// unique across rules; `to` always names a real route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub from: RoutePath,
    pub to: RoutePath,
}

impl RedirectRule {
    pub fn new(from: impl Into<RoutePath>, to: impl Into<RoutePath>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for RedirectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Which strategy produced a candidate (for diagnostics and warnings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Origin {
    FromExtensions,
    ToExtensions,
    /// Index into `[[redirects.rules]]`, declaration order.
    Rule(usize),
    /// The route the creator was invoked with.
    Creator(RoutePath),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromExtensions => write!(f, "redirects.from_extensions"),
            Self::ToExtensions => write!(f, "redirects.to_extensions"),
            Self::Rule(i) => write!(f, "redirects.rules[{i}]"),
            Self::Creator(route) => write!(f, "redirects.create `{route}`"),
        }
    }
}

/// A rule produced by one strategy, before validation and filtering.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub rule: RedirectRule,
    pub origin: Origin,
}

impl Candidate {
    pub(crate) fn new(rule: RedirectRule, origin: Origin) -> Self {
        Self { rule, origin }
    }
}

/// Build-pipeline inputs for one collection pass, all read-only.
pub struct CollectContext<'a> {
    /// Every route the finished build will serve, in build order. Duplicate
    /// entries are tolerated (deduplicated order-preserving).
    pub routes: &'a [RoutePath],
    /// Site base url; quoted in diagnostics only.
    pub base_url: &'a str,
    /// Trailing-slash convention applied to rule targets.
    pub trailing_slash: TrailingSlash,
}

/// Per-route redirect generator.
///
/// Invoked exactly once per distinct route, in route-list order. The return
/// value is interpreted at the boundary: JSON `null` means no redirect, a
/// string one source path, an array of strings several; anything else is a
/// configuration error.
pub type RedirectCreator<'a> = dyn Fn(&RoutePath) -> serde_json::Value + 'a;

// ============================================================================
// Collection
// ============================================================================

/// Compute the final redirect rule list for one build.
///
/// Candidates are gathered strategy-major (extension-derived, then explicit
/// rules, then creator output), targets are normalized to the site's
/// trailing-slash convention, every candidate is validated, and sources that
/// shadow real routes or repeat earlier sources are dropped. Order is
/// preserved throughout, so the first candidate wins a duplicated source.
pub fn collect_redirects(
    ctx: &CollectContext,
    options: &RedirectsSection,
    creator: Option<&RedirectCreator>,
) -> Result<Vec<RedirectRule>, RedirectDiagnostics> {
    let routes = dedup_routes(ctx.routes);
    let mut diags = RedirectDiagnostics::new();

    let mut candidates = extension::from_extension_candidates(&routes, &options.from_extensions);
    candidates.extend(extension::to_extension_candidates(
        &routes,
        &options.to_extensions,
    ));
    candidates.extend(explicit::rule_candidates(&options.rules));
    if let Some(creator) = creator {
        candidates.extend(creator::creator_candidates(&routes, creator, &mut diags));
    }

    normalize::normalize_targets(&mut candidates, ctx.trailing_slash);

    let route_set: FxHashSet<&str> = routes.iter().map(RoutePath::as_str).collect();
    validate::validate_candidates(&candidates, &route_set, ctx.base_url, &mut diags);
    if diags.has_errors() {
        return Err(diags);
    }

    let outcome = filter::filter_candidates(candidates, &route_set, options.on_duplicate, &mut diags);
    if diags.has_errors() {
        return Err(diags);
    }

    report_dropped(&outcome);
    Ok(outcome.rules)
}

/// Deduplicate the supplied route list, keeping first occurrences in order.
fn dedup_routes(routes: &[RoutePath]) -> Vec<RoutePath> {
    let mut seen = FxHashSet::default();
    routes
        .iter()
        .filter(|route| seen.insert(route.as_str()))
        .cloned()
        .collect()
}

/// Log what the filter dropped. Dropped candidates are expected during
/// normal operation (extension strategies race real `.html` files), so they
/// warn instead of failing.
fn report_dropped(outcome: &filter::FilterOutcome) {
    if !outcome.shadowed.is_empty() {
        log!("warning"; "{} would shadow real routes, skipped",
            plural_count(outcome.shadowed.len(), "redirect"));
        for candidate in &outcome.shadowed {
            debug!("warning"; "  {} is a real route ({})", candidate.rule.from, candidate.origin);
        }
    }

    if !outcome.superseded.is_empty() {
        log!("warning"; "{} repeat earlier sources, first kept",
            plural_count(outcome.superseded.len(), "redirect"));
        for candidate in &outcome.superseded {
            debug!("warning"; "  {} ({})", candidate.rule, candidate.origin);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DuplicateHandling, ExplicitRedirect, SourcePaths};
    use serde_json::{Value, json};
    use std::cell::RefCell;

    fn routes(paths: &[&str]) -> Vec<RoutePath> {
        paths.iter().copied().map(RoutePath::from).collect()
    }

    fn ctx<'a>(routes: &'a [RoutePath], trailing_slash: TrailingSlash) -> CollectContext<'a> {
        CollectContext {
            routes,
            base_url: "/",
            trailing_slash,
        }
    }

    fn rule(from: &str, to: &str) -> RedirectRule {
        RedirectRule::new(from, to)
    }

    fn explicit(from: SourcePaths, to: &str) -> ExplicitRedirect {
        ExplicitRedirect {
            from,
            to: to.to_string(),
        }
    }

    #[test]
    fn test_no_strategies_no_rules() {
        let routes = routes(&["/", "/a"]);
        let options = RedirectsSection::default();
        let rules =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, None).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_both_extension_strategies_with_colliding_routes() {
        let routes = routes(&[
            "/",
            "/somePath",
            "/somePath.html",
            "/somePath.exe",
            "/fromShouldWork.html",
            "/toShouldWork",
        ]);
        let options = RedirectsSection {
            from_extensions: vec!["html".into(), "exe".into()],
            to_extensions: vec!["html".into(), "exe".into()],
            ..Default::default()
        };

        let rules =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, None).unwrap();
        assert_eq!(
            rules,
            vec![
                rule("/toShouldWork.html", "/toShouldWork"),
                rule("/toShouldWork.exe", "/toShouldWork"),
                rule("/fromShouldWork", "/fromShouldWork.html"),
            ]
        );
    }

    #[test]
    fn test_explicit_rule_expansion() {
        let routes = routes(&["/"]);
        let options = RedirectsSection {
            rules: vec![explicit(
                SourcePaths::Many(vec!["/a1".into(), "/a2".into()]),
                "/",
            )],
            ..Default::default()
        };

        let rules =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, None).unwrap();
        assert_eq!(rules, vec![rule("/a1", "/"), rule("/a2", "/")]);
    }

    #[test]
    fn test_trailing_slash_normalization_of_targets() {
        let routes = routes(&["/", "/somePath/"]);
        let options = RedirectsSection {
            rules: vec![explicit(SourcePaths::One("/legacy".into()), "/somePath")],
            ..Default::default()
        };

        let rules =
            collect_redirects(&ctx(&routes, TrailingSlash::Always), &options, None).unwrap();
        assert_eq!(rules, vec![rule("/legacy", "/somePath/")]);

        let routes = self::routes(&["/", "/somePath"]);
        let options = RedirectsSection {
            rules: vec![explicit(SourcePaths::One("/legacy".into()), "/somePath/")],
            ..Default::default()
        };

        let rules = collect_redirects(&ctx(&routes, TrailingSlash::Never), &options, None).unwrap();
        assert_eq!(rules, vec![rule("/legacy", "/somePath")]);
    }

    #[test]
    fn test_unresolvable_target_fails() {
        let routes = routes(&["/", "/docs"]);
        let options = RedirectsSection {
            rules: vec![explicit(SourcePaths::One("/legacy".into()), "/missing")],
            ..Default::default()
        };

        let err =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, None).unwrap_err();
        let display = format!("{err}");
        assert!(display.contains("/missing"));
        assert!(display.contains("redirects.rules[0]"));
    }

    #[test]
    fn test_creator_single_and_many() {
        let routes = routes(&["/", "/docs/intro", "/blog"]);
        let options = RedirectsSection::default();
        let creator = |route: &RoutePath| -> Value {
            match route.as_str() {
                "/docs/intro" => json!("/docs/old-intro"),
                "/blog" => json!(["/news", "/posts"]),
                _ => Value::Null,
            }
        };

        let rules =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, Some(&creator))
                .unwrap();
        assert_eq!(
            rules,
            vec![
                rule("/docs/old-intro", "/docs/intro"),
                rule("/news", "/blog"),
                rule("/posts", "/blog"),
            ]
        );
    }

    #[test]
    fn test_creator_invoked_once_per_route_in_order() {
        let routes = routes(&["/", "/a", "/a", "/b"]);
        let options = RedirectsSection::default();
        let calls: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let creator = |route: &RoutePath| -> Value {
            calls.borrow_mut().push(route.as_str().to_string());
            Value::Null
        };

        collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, Some(&creator))
            .unwrap();
        // Duplicate route deduplicated before the creator runs
        assert_eq!(*calls.borrow(), ["/", "/a", "/b"]);
    }

    #[test]
    fn test_creator_nested_sequence_rejected() {
        let routes = routes(&["/", "/a"]);
        let options = RedirectsSection::default();
        let creator = |route: &RoutePath| -> Value {
            if route.as_str() == "/a" {
                json!([["/nested"]])
            } else {
                Value::Null
            }
        };

        let err =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, Some(&creator))
                .unwrap_err();
        let display = format!("{err}");
        assert!(display.contains("redirects.create"));
        assert!(display.contains("/a"));
    }

    #[test]
    fn test_creator_malformed_path_rejected() {
        let routes = routes(&["/", "/a"]);
        let options = RedirectsSection::default();
        let creator = |route: &RoutePath| -> Value {
            match route.as_str() {
                "/a" => json!(["https://example.com/a", "/ok?query=1"]),
                _ => Value::Null,
            }
        };

        let err =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, Some(&creator))
                .unwrap_err();
        assert_eq!(err.len(), 2);
        let display = format!("{err}");
        assert!(display.contains("https://example.com/a"));
        assert!(display.contains("/ok?query=1"));
    }

    #[test]
    fn test_errors_aggregate_across_strategies() {
        // A bad creator shape and a bad explicit target are reported together
        let routes = routes(&["/", "/a"]);
        let options = RedirectsSection {
            rules: vec![explicit(SourcePaths::One("/legacy".into()), "/missing")],
            ..Default::default()
        };
        let creator = |_: &RoutePath| -> Value { json!(42) };

        let err =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, Some(&creator))
                .unwrap_err();
        let display = format!("{err}");
        assert!(display.contains("/missing"));
        assert!(display.contains("redirects.create"));
    }

    #[test]
    fn test_first_wins_across_strategies() {
        // The extension-derived candidate precedes the explicit rule for the
        // same source, so it wins and the explicit rule is dropped
        let routes = routes(&["/", "/docs", "/other"]);
        let options = RedirectsSection {
            from_extensions: vec!["html".into()],
            rules: vec![explicit(SourcePaths::One("/docs.html".into()), "/other")],
            ..Default::default()
        };

        let rules =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, None).unwrap();
        assert_eq!(
            rules,
            vec![rule("/docs.html", "/docs"), rule("/other.html", "/other")]
        );
    }

    #[test]
    fn test_conflicting_duplicate_errors_when_configured() {
        let routes = routes(&["/", "/docs", "/other"]);
        let options = RedirectsSection {
            on_duplicate: DuplicateHandling::Error,
            rules: vec![
                explicit(SourcePaths::One("/legacy".into()), "/docs"),
                explicit(SourcePaths::One("/legacy".into()), "/other"),
            ],
            ..Default::default()
        };

        let err =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, None).unwrap_err();
        assert!(format!("{err}").contains("/legacy"));

        // Identical duplicates stay deduplicated, not fatal
        let options = RedirectsSection {
            on_duplicate: DuplicateHandling::Error,
            rules: vec![
                explicit(SourcePaths::One("/legacy".into()), "/docs"),
                explicit(SourcePaths::One("/legacy".into()), "/docs"),
            ],
            ..Default::default()
        };
        let rules =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, None).unwrap();
        assert_eq!(rules, vec![rule("/legacy", "/docs")]);
    }

    #[test]
    fn test_output_never_shadows_and_targets_are_real() {
        let routes = routes(&["/", "/a", "/a.html", "/b/", "/c"]);
        let options = RedirectsSection {
            from_extensions: vec!["html".into()],
            to_extensions: vec!["html".into()],
            rules: vec![
                explicit(SourcePaths::Many(vec!["/old-a".into(), "/old-c".into()]), "/c"),
                explicit(SourcePaths::One("/a".into()), "/c"),
            ],
            ..Default::default()
        };
        let creator = |route: &RoutePath| -> Value {
            if route.as_str() == "/b/" {
                json!("/b-legacy")
            } else {
                Value::Null
            }
        };

        let route_list = routes.clone();
        let rules =
            collect_redirects(&ctx(&routes, TrailingSlash::Preserve), &options, Some(&creator))
                .unwrap();

        assert!(!rules.is_empty());
        for rule in &rules {
            assert!(
                !route_list.contains(&rule.from),
                "{} shadows a real route",
                rule.from
            );
            assert!(
                route_list.contains(&rule.to),
                "{} is not a real route",
                rule.to
            );
        }

        // Sources are unique
        let mut froms: Vec<_> = rules.iter().map(|r| r.from.as_str()).collect();
        froms.sort_unstable();
        froms.dedup();
        assert_eq!(froms.len(), rules.len());
    }
}
