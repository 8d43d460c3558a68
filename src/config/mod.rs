//! Tool configuration management for `reroute.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                             |
//! |---------------|-----------------------------------------------------|
//! | `[site]`      | Site url, base url, trailing-slash convention       |
//! | `[redirects]` | Generation strategies (extensions, rules, creator)  |

mod error;
mod redirects;
mod site;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use redirects::{DuplicateHandling, ExplicitRedirect, RedirectsSection, SourcePaths};
pub use site::{SiteSection, TrailingSlash};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::debug;

/// Root configuration structure representing reroute.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide serving conventions
    pub site: SiteSection,

    /// Redirect generation strategies
    pub redirects: RedirectsSection,
}

impl Config {
    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist (everything can be driven from the CLI).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("config"; "`{}` not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Apply CLI overrides on top of the loaded file.
    pub fn apply_overrides(
        &mut self,
        base_url: Option<&str>,
        trailing_slash: Option<TrailingSlash>,
    ) {
        if let Some(base_url) = base_url {
            self.site.base_url = base_url.to_string();
        }
        if let Some(trailing_slash) = trailing_slash {
            self.site.trailing_slash = trailing_slash;
        }
    }

    /// Validate the finalized configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diags = ConfigDiagnostics::new();
        self.site.validate(&mut diags);
        self.redirects.validate(&mut diags);
        diags.into_result().map_err(ConfigError::Diagnostics)
    }
}

/// Parse a config from a TOML string (test helper).
#[cfg(test)]
pub(crate) fn test_parse_config(raw: &str) -> Config {
    toml::from_str(raw).expect("test config must parse")
}
