//! License resolution for a single package.
//!
//! - [`repo`] — turns a GitHub homepage into an owner/repository pair.
//! - [`LicenseResolver`] — keeps a declared license when there is one, and
//!   otherwise makes at most one remote lookup through a [`LicenseLookup`].

pub mod repo;

use tracing::debug;

use crate::models::{LicenseResult, Unresolved, UNKNOWN};
use crate::registry::LicenseLookup;
use repo::GitHubRepo;

pub struct LicenseResolver<L> {
    lookup: L,
}

impl<L: LicenseLookup> LicenseResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Best-known license for a package declaring `license` with homepage `home_page`.
    pub fn resolve(&self, license: &str, home_page: &str) -> LicenseResult {
        if !license.eq_ignore_ascii_case(UNKNOWN) {
            return LicenseResult::Resolved(license.to_string());
        }

        if home_page.trim().is_empty() || home_page.eq_ignore_ascii_case(UNKNOWN) {
            return LicenseResult::Unresolved(Unresolved::NoHomepage);
        }

        let repo = match GitHubRepo::from_homepage(home_page) {
            Ok(repo) => repo,
            Err(reason) => return LicenseResult::Unresolved(reason),
        };

        let result = self.lookup.fetch_license(&repo);
        if let LicenseResult::Unresolved(reason) = &result {
            debug!("No license for {}: {}", repo, reason);
        }
        result
    }
}
