//! `license-inventory` — list installed Python packages with their licenses.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) into a [`config::Config`].
//! 2. Locate installed distributions ([`inventory`]).
//! 3. Resolve each license, falling back to one GitHub lookup for packages
//!    declaring none ([`license`], [`registry`]).
//! 4. Write the spreadsheet ([`report`]) and print one confirmation line.

mod cli;
mod config;
mod inventory;
mod license;
mod models;
mod pipeline;
mod registry;
mod report;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{Config, SearchRoots};
use inventory::python::SitePackagesRegistry;
use license::LicenseResolver;
use pipeline::collect_records;
use registry::github::GitHubClient;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_cli(&cli);

    let registry = match &config.search {
        SearchRoots::Explicit(paths) => SitePackagesRegistry::new(paths.clone()),
        SearchRoots::Interpreter(python) => SitePackagesRegistry::discover(python)?,
    };
    for root in registry.roots() {
        debug!("Search root: {}", root.display());
    }

    if config.github_token.is_none() {
        debug!("GITHUB_TOKEN not set, GitHub lookups are unauthenticated");
    }
    let client = GitHubClient::new(&config.api_url, config.github_token.clone())?;
    let resolver = LicenseResolver::new(client);

    let inventory = collect_records(&registry, &resolver);

    report::xlsx::render(&inventory.records, &config.output)?;

    println!(
        "{} Dependency information has been saved to '{}'.",
        "✓".green(),
        config.output.display()
    );

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
