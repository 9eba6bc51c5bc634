use std::path::PathBuf;

use crate::cli::Cli;

/// Run settings resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Spreadsheet written at the end of the run.
    pub output: PathBuf,
    /// Where installed distributions are looked for.
    pub search: SearchRoots,
    /// Base URL of the GitHub REST API.
    pub api_url: String,
    /// Bearer token for GitHub; never empty.
    pub github_token: Option<String>,
}

/// Source of the directories scanned for installed distributions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRoots {
    /// Directories named on the command line, in order.
    Explicit(Vec<PathBuf>),
    /// The `sys.path` of this interpreter.
    Interpreter(String),
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let search = if cli.paths.is_empty() {
            SearchRoots::Interpreter(cli.python.clone())
        } else {
            SearchRoots::Explicit(cli.paths.clone())
        };

        Config {
            output: cli.output.clone(),
            search,
            api_url: cli.api_url.clone(),
            github_token: cli
                .github_token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }
}
