use std::fmt;

/// Placeholder written for any field that could not be determined.
pub const UNKNOWN: &str = "Unknown";

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub license: String,
    pub project_url: String,
}

/// Declared metadata of a single installed distribution.
///
/// Fields other than `name` are `None` only when the header is missing; a blank
/// header is kept as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPackageInfo {
    pub name: String,
    pub version: Option<String>,
    pub license: Option<String>,
    pub home_page: Option<String>,
}

impl RawPackageInfo {
    /// Declared license, or [`UNKNOWN`].
    pub fn declared_license(&self) -> &str {
        self.license.as_deref().unwrap_or(UNKNOWN)
    }

    /// Declared homepage, or [`UNKNOWN`].
    pub fn declared_home_page(&self) -> &str {
        self.home_page.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Outcome of resolving a package's license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseResult {
    Resolved(String),
    Unresolved(Unresolved),
}

impl LicenseResult {
    /// The string written to the report; every unresolved outcome becomes [`UNKNOWN`].
    pub fn into_license(self) -> String {
        match self {
            LicenseResult::Resolved(license) => license,
            LicenseResult::Unresolved(_) => UNKNOWN.to_string(),
        }
    }
}

/// Why no license could be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// Homepage absent or literally "Unknown".
    NoHomepage,
    /// Homepage does not parse as a URL.
    MalformedUrl,
    /// Homepage is hosted somewhere other than github.com.
    UntrustedHost,
    /// Homepage path has fewer than two segments.
    IncompleteRepoPath,
    /// License endpoint answered with something other than 200.
    HttpStatus(u16),
    /// Request never completed.
    Network(String),
    /// 200 response whose body could not be decoded.
    InvalidBody(String),
    /// 200 response without `license.spdx_id`.
    MissingSpdxId,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NoHomepage => write!(f, "no homepage declared"),
            Unresolved::MalformedUrl => write!(f, "homepage is not a valid URL"),
            Unresolved::UntrustedHost => write!(f, "homepage is not hosted on GitHub"),
            Unresolved::IncompleteRepoPath => write!(f, "homepage does not name an owner and repository"),
            Unresolved::HttpStatus(code) => write!(f, "license endpoint returned status {}", code),
            Unresolved::Network(details) => write!(f, "request failed: {}", details),
            Unresolved::InvalidBody(details) => write!(f, "unreadable response body: {}", details),
            Unresolved::MissingSpdxId => write!(f, "response carries no SPDX identifier"),
        }
    }
}
