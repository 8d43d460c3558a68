//! `[redirects]` section: the redirect generation strategies.

use serde::{Deserialize, Serialize};

use super::ConfigDiagnostics;

/// What to do when two candidates claim the same source path.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateHandling {
    /// Keep the first candidate (strategy order, then declaration order);
    /// later ones are superseded and reported as warnings (default).
    #[default]
    FirstWins,
    /// Abort when two candidates share a source but disagree on the target.
    Error,
}

/// One or many source paths for an explicit rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SourcePaths {
    One(String),
    Many(Vec<String>),
}

impl SourcePaths {
    /// Iterate the source paths regardless of form.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            Self::One(path) => std::slice::from_ref(path),
            Self::Many(paths) => paths.as_slice(),
        }
        .iter()
        .map(String::as_str)
    }
}

/// An explicit redirect rule: one or many sources pointing at one target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplicitRedirect {
    pub from: SourcePaths,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectsSection {
    /// Extensions stripped from existing routes: a route `/a` gains a
    /// redirect from `/a.<ext>`.
    pub from_extensions: Vec<String>,

    /// Extensions added to existing routes: a route `/a.<ext>` gains a
    /// redirect from `/a`.
    pub to_extensions: Vec<String>,

    /// Explicit rules, in declaration order.
    pub rules: Vec<ExplicitRedirect>,

    /// External command generating per-route redirects (routes on stdin as
    /// JSON, route → sources object on stdout).
    pub create: Option<Vec<String>>,

    /// Duplicate source resolution policy.
    pub on_duplicate: DuplicateHandling,
}

impl RedirectsSection {
    pub(super) fn validate(&self, diags: &mut ConfigDiagnostics) {
        validate_extensions("redirects.from_extensions", &self.from_extensions, diags);
        validate_extensions("redirects.to_extensions", &self.to_extensions, diags);

        for (i, rule) in self.rules.iter().enumerate() {
            let field = format!("redirects.rules[{i}]");
            if rule.to.is_empty() {
                diags.error(&field, "`to` must not be empty");
            }
            if rule.from.iter().count() == 0 {
                diags.error(&field, "`from` must name at least one source path");
            }
            if rule.from.iter().any(str::is_empty) {
                diags.error(&field, "`from` entries must not be empty");
            }
        }

        if let Some(command) = &self.create
            && command.is_empty()
        {
            diags.error_with_hint(
                "redirects.create",
                "command must not be empty",
                "e.g. create = [\"./scripts/redirects.sh\"]",
            );
        }
    }
}

/// Extensions are bare suffixes without the dot; the dot is inserted when
/// candidates are built.
fn validate_extensions(field: &str, extensions: &[String], diags: &mut ConfigDiagnostics) {
    for ext in extensions {
        if ext.is_empty() {
            diags.error(field, "extensions must not be empty strings");
        } else if ext.starts_with('.') || ext.ends_with('.') {
            diags.error_with_hint(
                field,
                format!("extension `{ext}` must not start or end with a dot"),
                format!("use \"{}\"", ext.trim_matches('.')),
            );
        } else if ext.contains('/') {
            diags.error(field, format!("extension `{ext}` must not contain `/`"));
        }
    }
}
