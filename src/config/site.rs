//! `[site]` section: where the finished build is served from.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::ConfigDiagnostics;

/// Site-wide trailing-slash convention, applied to redirect targets so they
/// compare against the route set in canonical form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// Ensure every target ends with `/`.
    Always,
    /// Strip the trailing `/` from every target (the root `/` stays).
    Never,
    /// Leave targets exactly as written (default).
    #[default]
    Preserve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Absolute site URL (e.g., `https://example.com`), used to build
    /// canonical links in rendered redirect pages.
    pub url: Option<String>,

    /// Path prefix the site is served under. Prepended when destination
    /// URLs are rendered; quoted in diagnostics.
    pub base_url: String,

    /// Trailing-slash convention for redirect targets.
    pub trailing_slash: TrailingSlash,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            url: None,
            base_url: "/".to_string(),
            trailing_slash: TrailingSlash::Preserve,
        }
    }
}

impl SiteSection {
    pub(super) fn validate(&self, diags: &mut ConfigDiagnostics) {
        if !self.base_url.starts_with('/') {
            diags.error_with_hint(
                "site.base_url",
                format!("`{}` must start with `/`", self.base_url),
                "the base url is a path prefix, e.g. \"/\" or \"/docs/\"",
            );
        }

        if let Some(url) = &self.url {
            match url::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => diags.error(
                    "site.url",
                    format!("unsupported scheme `{}` in `{}`", parsed.scheme(), url),
                ),
                Err(e) => diags.error_with_hint(
                    "site.url",
                    format!("`{url}` is not an absolute URL: {e}"),
                    "expected something like \"https://example.com\"",
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.url, None);
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.site.trailing_slash, TrailingSlash::Preserve);
    }

    #[test]
    fn test_trailing_slash_parsing() {
        for (input, expected) in [
            ("always", TrailingSlash::Always),
            ("never", TrailingSlash::Never),
            ("preserve", TrailingSlash::Preserve),
        ] {
            let config = test_parse_config(&format!("[site]\ntrailing_slash = \"{input}\""));
            assert_eq!(
                config.site.trailing_slash, expected,
                "parsing failed for {input}"
            );
        }
    }

    #[test]
    fn test_base_url_must_be_path() {
        let config = test_parse_config("[site]\nbase_url = \"docs/\"");
        let mut diags = ConfigDiagnostics::new();
        config.site.validate(&mut diags);
        assert!(diags.has_errors());
        assert!(format!("{diags}").contains("site.base_url"));
    }

    #[test]
    fn test_site_url_validation() {
        let config = test_parse_config("[site]\nurl = \"https://example.com\"");
        let mut diags = ConfigDiagnostics::new();
        config.site.validate(&mut diags);
        assert!(diags.is_empty());

        let config = test_parse_config("[site]\nurl = \"example.com\"");
        let mut diags = ConfigDiagnostics::new();
        config.site.validate(&mut diags);
        assert!(diags.has_errors());

        let config = test_parse_config("[site]\nurl = \"ftp://example.com\"");
        let mut diags = ConfigDiagnostics::new();
        config.site.validate(&mut diags);
        assert!(diags.has_errors());
    }
}
