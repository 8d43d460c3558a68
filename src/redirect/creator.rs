//! Programmatic redirect creation.
//!
//! The creator is the one external call surface of the collection pass. It
//! answers with loosely typed JSON (hook commands and plugin scripts produce
//! it), so the value is converted to a tagged form at the boundary and every
//! other shape is rejected as a configuration error.

use serde_json::Value;

use super::{Candidate, Origin, RedirectCreator, RedirectRule, error::RedirectDiagnostics};
use crate::core::RoutePath;

/// Interpreted creator return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Created {
    /// No redirect for this route.
    None,
    /// One source path redirecting to the route.
    One(String),
    /// Several source paths redirecting to the route.
    Many(Vec<String>),
}

impl Created {
    /// Convert the raw creator value, rejecting anything that is not
    /// `null`, a string, or a flat array of strings.
    pub(crate) fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::None),
            Value::String(path) => Ok(Self::One(path.clone())),
            Value::Array(items) => {
                let mut paths = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(path) => paths.push(path.clone()),
                        other => return Err(shape_error(other)),
                    }
                }
                Ok(Self::Many(paths))
            }
            other => Err(shape_error(other)),
        }
    }
}

fn shape_error(value: &Value) -> String {
    format!(
        "expected nothing, a path, or a flat list of paths, got `{}`",
        serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".into())
    )
}

/// Invoke the creator once per route, in route-list order, and flatten its
/// answers into candidates. Shape errors are collected per route; the
/// routes that answered well still contribute candidates so the final
/// report covers as much as possible.
pub(crate) fn creator_candidates(
    routes: &[RoutePath],
    creator: &RedirectCreator,
    diags: &mut RedirectDiagnostics,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for route in routes {
        let value = creator(route);
        match Created::from_value(&value) {
            Ok(Created::None) => {}
            Ok(Created::One(from)) => candidates.push(candidate(from, route)),
            Ok(Created::Many(froms)) => {
                candidates.extend(froms.into_iter().map(|from| candidate(from, route)));
            }
            Err(shape) => diags.error(Origin::Creator(route.clone()).to_string(), shape),
        }
    }

    candidates
}

fn candidate(from: String, route: &RoutePath) -> Candidate {
    Candidate::new(
        RedirectRule::new(from, route.clone()),
        Origin::Creator(route.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_null() {
        assert_eq!(Created::from_value(&Value::Null), Ok(Created::None));
    }

    #[test]
    fn test_from_value_string() {
        assert_eq!(
            Created::from_value(&json!("/legacy")),
            Ok(Created::One("/legacy".into()))
        );
    }

    #[test]
    fn test_from_value_flat_array() {
        assert_eq!(
            Created::from_value(&json!(["/a", "/b"])),
            Ok(Created::Many(vec!["/a".into(), "/b".into()]))
        );
        assert_eq!(Created::from_value(&json!([])), Ok(Created::Many(vec![])));
    }

    #[test]
    fn test_from_value_rejects_other_shapes() {
        for bad in [json!(42), json!(true), json!({"from": "/a"}), json!([["/a"]]), json!(["/a", 1])]
        {
            let err = Created::from_value(&bad).unwrap_err();
            assert!(err.contains("expected nothing"), "no error for {bad}");
        }
    }

    #[test]
    fn test_shape_error_names_the_value() {
        let err = Created::from_value(&json!([["/nested"]])).unwrap_err();
        assert!(err.contains("/nested"));
    }

    #[test]
    fn test_creator_candidates_flatten() {
        let routes: Vec<RoutePath> = ["/", "/a", "/b"].iter().copied().map(Into::into).collect();
        let creator = |route: &RoutePath| -> Value {
            match route.as_str() {
                "/a" => json!("/a-old"),
                "/b" => json!(["/b1", "/b2"]),
                _ => Value::Null,
            }
        };

        let mut diags = RedirectDiagnostics::new();
        let candidates = creator_candidates(&routes, &creator, &mut diags);
        assert!(diags.is_empty());
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].rule, RedirectRule::new("/a-old", "/a"));
        assert_eq!(candidates[1].rule, RedirectRule::new("/b1", "/b"));
        assert_eq!(candidates[2].rule, RedirectRule::new("/b2", "/b"));
        assert_eq!(candidates[0].origin, Origin::Creator("/a".into()));
    }

    #[test]
    fn test_creator_candidates_collect_all_shape_errors() {
        let routes: Vec<RoutePath> = ["/x", "/y", "/z"].iter().copied().map(Into::into).collect();
        let creator = |route: &RoutePath| -> Value {
            match route.as_str() {
                "/x" => json!(1),
                "/y" => json!("/fine"),
                _ => json!({}),
            }
        };

        let mut diags = RedirectDiagnostics::new();
        let candidates = creator_candidates(&routes, &creator, &mut diags);

        // Both bad routes reported, the good one still produced a candidate
        assert_eq!(diags.len(), 2);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].rule, RedirectRule::new("/fine", "/y"));

        let contexts: Vec<_> = diags.errors().iter().map(|e| e.context.clone()).collect();
        assert!(contexts[0].contains("/x"));
        assert!(contexts[1].contains("/z"));
    }
}
