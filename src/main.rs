//! infracheck CLI - property verification for Terraform AWS/EKS templates
//!
//! Usage: infracheck [OPTIONS] [COMMAND]
//!
//! Commands:
//!   check    Evaluate properties against the template (default)
//!   list     List the property catalog
//!   explain  Describe what a property expects

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{CheckArgs, Cli, Commands};

/// Overrides the `-v` derived filter (EnvFilter syntax)
const LOG_ENV: &str = "INFRACHECK_LOG";

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.take() {
        None => commands::cmd_check(&cli, CheckArgs::default()),
        Some(Commands::Check(args)) => commands::cmd_check(&cli, args),
        Some(Commands::List { categories }) => commands::cmd_list(&cli, categories),
        Some(Commands::Explain { id }) => commands::cmd_explain(&cli, &id),
    }
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
