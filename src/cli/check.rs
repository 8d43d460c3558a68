//! Check command implementation.
//!
//! Runs the whole collection pass without emitting anything, for CI and
//! pre-deploy validation. Any redirect misconfiguration fails the command
//! with the aggregated report.

use anyhow::Result;

use super::args::CheckArgs;
use super::common::{compute_plan, load_routes};
use crate::config::Config;
use crate::log;
use crate::utils::plural_count;

/// Execute check command
pub fn run_check(args: &CheckArgs, config: &Config) -> Result<()> {
    let routes = load_routes(&args.collect.routes)?;
    let rules = compute_plan(config, &routes)?;

    log!("check"; "redirect plan ok: {} over {}",
        plural_count(rules.len(), "redirect"),
        plural_count(routes.len(), "route"));
    Ok(())
}
