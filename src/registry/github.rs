use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::LicenseLookup;
use crate::license::repo::GitHubRepo;
use crate::models::{LicenseResult, Unresolved};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct LicenseResponse {
    #[serde(default)]
    license: Option<LicenseBody>,
}

#[derive(Debug, Deserialize)]
struct LicenseBody {
    #[serde(default)]
    spdx_id: Option<String>,
}

/// Client for `GET /repos/{owner}/{repo}/license`.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Build a client against `api_url`, authenticating with `token` when given.
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("license-inventory/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn license_url(&self, repo: &GitHubRepo) -> String {
        format!("{}/repos/{}/{}/license", self.api_url, repo.owner, repo.repo)
    }
}

impl LicenseLookup for GitHubClient {
    fn fetch_license(&self, repo: &GitHubRepo) -> LicenseResult {
        let url = self.license_url(repo);
        debug!("Fetching license from {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => return LicenseResult::Unresolved(Unresolved::Network(e.to_string())),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return LicenseResult::Unresolved(Unresolved::HttpStatus(status.as_u16()));
        }

        match response.json::<LicenseResponse>() {
            Ok(body) => body
                .license
                .and_then(|l| l.spdx_id)
                .filter(|id| !id.is_empty())
                .map(LicenseResult::Resolved)
                .unwrap_or(LicenseResult::Unresolved(Unresolved::MissingSpdxId)),
            Err(e) => LicenseResult::Unresolved(Unresolved::InvalidBody(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> GitHubRepo {
        GitHubRepo {
            owner: "ownerA".to_string(),
            repo: "repoB".to_string(),
        }
    }

    #[test]
    fn test_fetch_license_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/repos/ownerA/repoB/license")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "LICENSE", "license": {"key": "mit", "spdx_id": "MIT"}}"#)
            .create();

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let result = client.fetch_license(&repo());

        mock.assert();
        assert_eq!(result, LicenseResult::Resolved("MIT".to_string()));
    }

    #[test]
    fn test_fetch_license_not_found() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/repos/ownerA/repoB/license")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .expect(1)
            .create();

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let result = client.fetch_license(&repo());

        mock.assert();
        assert_eq!(result, LicenseResult::Unresolved(Unresolved::HttpStatus(404)));
    }

    #[test]
    fn test_fetch_license_sends_bearer_token() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/repos/ownerA/repoB/license")
            .match_header("authorization", "Bearer secret-token")
            .match_header("accept", "application/vnd.github+json")
            .with_status(200)
            .with_body(r#"{"license": {"spdx_id": "Apache-2.0"}}"#)
            .create();

        let client = GitHubClient::new(&server.url(), Some("secret-token".to_string())).unwrap();
        let result = client.fetch_license(&repo());

        mock.assert();
        assert_eq!(result.into_license(), "Apache-2.0");
    }

    #[test]
    fn test_fetch_license_without_token_has_no_authorization() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/repos/ownerA/repoB/license")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"license": {"spdx_id": "MIT"}}"#)
            .create();

        let client = GitHubClient::new(&server.url(), None).unwrap();
        client.fetch_license(&repo());

        mock.assert();
    }

    #[test]
    fn test_fetch_license_missing_spdx_id() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/repos/ownerA/repoB/license")
            .with_status(200)
            .with_body(r#"{"license": {"key": "other", "spdx_id": null}}"#)
            .create();

        let client = GitHubClient::new(&server.url(), None).unwrap();
        assert_eq!(
            client.fetch_license(&repo()),
            LicenseResult::Unresolved(Unresolved::MissingSpdxId)
        );
    }

    #[test]
    fn test_fetch_license_invalid_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/repos/ownerA/repoB/license")
            .with_status(200)
            .with_body("<html>rate limited</html>")
            .create();

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let result = client.fetch_license(&repo());
        assert!(matches!(
            result,
            LicenseResult::Unresolved(Unresolved::InvalidBody(_))
        ));
        assert_eq!(result.into_license(), "Unknown");
    }

    #[test]
    fn test_fetch_license_network_failure() {
        // Nothing listens on port 1
        let client = GitHubClient::new("http://127.0.0.1:1", None).unwrap();
        let result = client.fetch_license(&repo());
        assert!(matches!(
            result,
            LicenseResult::Unresolved(Unresolved::Network(_))
        ));
    }

    #[test]
    fn test_api_url_trailing_slash() {
        let client = GitHubClient::new("https://api.github.com/", None).unwrap();
        assert_eq!(
            client.license_url(&repo()),
            "https://api.github.com/repos/ownerA/repoB/license"
        );
    }
}
