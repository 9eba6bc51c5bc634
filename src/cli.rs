use std::path::PathBuf;

use clap::Parser;

use crate::registry::github::DEFAULT_API_URL;
use crate::report::DEFAULT_OUTPUT;

/// Inventory the installed Python packages and export their licenses to a spreadsheet.
///
/// Packages declaring no license but a GitHub homepage are looked up through the
/// GitHub API. Set GITHUB_TOKEN to raise the API rate limit.
#[derive(Parser, Debug)]
#[command(name = "license-inventory", version)]
pub struct Cli {
    /// Spreadsheet to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT, value_name = "FILE")]
    pub output: PathBuf,

    /// Site-packages directory to scan (repeatable); skips interpreter discovery
    #[arg(short, long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Python interpreter whose sys.path is scanned
    #[arg(long, default_value = "python3", value_name = "PROGRAM")]
    pub python: String,

    /// GitHub token used for license lookups
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// GitHub API URL
    #[arg(long, default_value = DEFAULT_API_URL, value_name = "URL")]
    pub api_url: String,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
