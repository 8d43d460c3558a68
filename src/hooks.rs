//! External creator command execution.
//!
//! The `[redirects] create` command is the programmatic strategy for sites
//! whose redirects cannot be written down statically. It runs once per plan:
//! the route list goes in as a JSON array on stdin, and the command answers
//! with a JSON object mapping each route to its redirect sources (string,
//! array of strings, or `null`/omitted for none). The collection engine
//! interprets the per-route values and rejects bad shapes.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::core::RoutePath;
use crate::debug;

// ============================================================================
// Environment Variables
// ============================================================================

/// Build `$REROUTE_*` environment variables for the creator command
pub fn creator_vars(base_url: &str, route_count: usize) -> FxHashMap<String, String> {
    let mut vars = FxHashMap::default();
    vars.insert("REROUTE_BASE_URL".into(), base_url.to_string());
    vars.insert("REROUTE_ROUTE_COUNT".into(), route_count.to_string());
    vars
}

/// Resolve `$REROUTE_*` variables in command arguments
///
/// Replaces occurrences of `$REROUTE_XXX` with actual values from the vars map
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                let pattern = format!("${}", key);
                result = result.replace(&pattern, value);
            }
            result
        })
        .collect()
}

// ============================================================================
// Command Execution
// ============================================================================

/// Run the creator command once and parse its route → sources answer.
pub fn run_creator_command(
    command: &[String],
    routes: &[RoutePath],
    base_url: &str,
) -> Result<FxHashMap<String, Value>> {
    let vars = creator_vars(base_url, routes.len());
    let resolved = resolve_args(command, &vars);
    let (program, args) = resolved
        .split_first()
        .context("creator command must not be empty")?;

    debug!("create"; "running `{}`", resolved.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .envs(&vars)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to run creator command `{program}`"))?;

    // Feed the route list; the command reads it all before answering
    {
        let mut stdin = child.stdin.take().context("creator stdin unavailable")?;
        let payload = serde_json::to_vec(routes)?;
        stdin
            .write_all(&payload)
            .context("failed to write routes to creator command")?;
    }

    let output = child
        .wait_with_output()
        .with_context(|| format!("creator command `{program}` did not finish"))?;
    if !output.status.success() {
        bail!("creator command `{program}` failed with {}", output.status);
    }

    serde_json::from_slice(&output.stdout)
        .context("creator command must print a JSON object mapping routes to redirect sources")
}
