//! Reroute - redirect rule planner for statically generated sites.

mod cli;
mod config;
mod core;
mod generator;
mod hooks;
mod logger;
mod redirect;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let mut config = Config::load(&cli.config)?;
    match &cli.command {
        Commands::Plan { args } => {
            config.apply_overrides(args.collect.base_url.as_deref(), args.collect.trailing_slash);
            config.validate()?;
            cli::plan::run_plan(args, &config)
        }
        Commands::Check { args } => {
            config.apply_overrides(args.collect.base_url.as_deref(), args.collect.trailing_slash);
            config.validate()?;
            cli::check::run_check(args, &config)
        }
    }
}
