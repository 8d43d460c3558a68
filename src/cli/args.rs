//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::TrailingSlash;

/// Reroute redirect planner CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: reroute.toml)
    #[arg(short = 'C', long, global = true, default_value = "reroute.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the redirect rules for a finished build
    #[command(visible_alias = "p")]
    Plan {
        #[command(flatten)]
        args: PlanArgs,
    },

    /// Validate the redirect configuration against a finished build
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

/// Arguments shared by `plan` and `check`.
#[derive(clap::Args, Debug, Clone)]
pub struct CollectArgs {
    /// Route list produced by the site build: a JSON array of paths or one
    /// path per line. Use `-` to read from stdin.
    #[arg(value_name = "ROUTES", value_hint = clap::ValueHint::FilePath)]
    pub routes: PathBuf,

    /// Override `[site] base_url`
    #[arg(short = 'B', long)]
    pub base_url: Option<String>,

    /// Override `[site] trailing_slash`
    #[arg(short = 'T', long, value_enum)]
    pub trailing_slash: Option<TrailingSlash>,
}

/// Plan command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub collect: CollectArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Include the rendered fallback page for each rule (JSON output only)
    #[arg(short = 'w', long)]
    pub with_pages: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub collect: CollectArgs,
}

/// Plan output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON array of `{from, to}` objects
    Json,
    /// One `from -> to` line per rule
    Text,
}
