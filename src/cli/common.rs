//! Shared plumbing for the plan and check commands.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::config::Config;
use crate::core::RoutePath;
use crate::hooks;
use crate::redirect::{CollectContext, RedirectRule, collect_redirects};

/// Read the route list from a file or stdin (`-`).
pub fn load_routes(path: &Path) -> Result<Vec<RoutePath>> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read routes from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read routes from `{}`", path.display()))?
    };
    parse_routes(&raw)
}

/// Routes are a JSON array (`["/", "/a"]`) or one path per line.
fn parse_routes(raw: &str) -> Result<Vec<RoutePath>> {
    if raw.trim_start().starts_with('[') {
        let routes: Vec<RoutePath> =
            serde_json::from_str(raw).context("route list is not a JSON array of paths")?;
        return Ok(routes);
    }

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RoutePath::from)
        .collect())
}

/// Run the collection engine with the configured strategies.
pub fn compute_plan(config: &Config, routes: &[RoutePath]) -> Result<Vec<RedirectRule>> {
    // The creator command runs once up front; the engine then consults its
    // answer route by route
    let creator_map = match &config.redirects.create {
        Some(command) => Some(hooks::run_creator_command(
            command,
            routes,
            &config.site.base_url,
        )?),
        None => None,
    };

    let ctx = CollectContext {
        routes,
        base_url: &config.site.base_url,
        trailing_slash: config.site.trailing_slash,
    };

    let rules = match &creator_map {
        Some(map) => {
            let creator =
                |route: &RoutePath| map.get(route.as_str()).cloned().unwrap_or(Value::Null);
            collect_redirects(&ctx, &config.redirects, Some(&creator))
        }
        None => collect_redirects(&ctx, &config.redirects, None),
    };

    rules.map_err(anyhow::Error::new)
}
