//! Plan command implementation.
//!
//! Computes the redirect rule list and emits it for the downstream artifact
//! writer: JSON (optionally with rendered fallback pages) or plain text.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;

use super::args::{OutputFormat, PlanArgs};
use super::common::{compute_plan, load_routes};
use crate::config::Config;
use crate::generator::page_for_rule;
use crate::log;
use crate::redirect::RedirectRule;
use crate::utils::plural_count;

/// One entry of the emitted plan
#[derive(Debug, Serialize)]
struct PlannedRedirect<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<String>,
}

/// Execute plan command
pub fn run_plan(args: &PlanArgs, config: &Config) -> Result<()> {
    let routes = load_routes(&args.collect.routes)?;
    let rules = compute_plan(config, &routes)?;

    log!("plan"; "planned {} over {}",
        plural_count(rules.len(), "redirect"),
        plural_count(routes.len(), "route"));

    let rendered = render_output(&rules, config, args)?;
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write plan to `{}`", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
        }
    }
    Ok(())
}

fn render_output(rules: &[RedirectRule], config: &Config, args: &PlanArgs) -> Result<String> {
    match args.format {
        OutputFormat::Text => Ok(rules
            .iter()
            .map(|rule| format!("{} -> {}\n", rule.from, rule.to))
            .collect()),
        OutputFormat::Json => {
            let entries: Vec<PlannedRedirect> = rules
                .iter()
                .map(|rule| PlannedRedirect {
                    from: rule.from.as_str(),
                    to: rule.to.as_str(),
                    page: args
                        .with_pages
                        .then(|| page_for_rule(&config.site, rule)),
                })
                .collect();

            let mut json = if args.pretty {
                serde_json::to_string_pretty(&entries)?
            } else {
                serde_json::to_string(&entries)?
            };
            json.push('\n');
            Ok(json)
        }
    }
}
