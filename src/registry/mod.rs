//! Blocking HTTP clients for looking up licenses on remote source hosts.
//!
//! A lookup never fails: every transport or protocol problem comes back as
//! [`LicenseResult::Unresolved`] with the reason attached.

pub mod github;

use crate::license::repo::GitHubRepo;
use crate::models::LicenseResult;

/// Single-attempt license lookup for a hosted repository.
pub trait LicenseLookup {
    fn fetch_license(&self, repo: &GitHubRepo) -> LicenseResult;
}
