use reqwest::Url;

use crate::models::Unresolved;

/// The only host whose homepages are looked up remotely.
pub const TRUSTED_HOST: &str = "github.com";

/// Owner and repository named by a GitHub homepage URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl GitHubRepo {
    /// Parse `https://github.com/{owner}/{repo}[/...]`.
    ///
    /// Uses the first two non-empty path segments; a trailing `.git` is dropped.
    /// The host is compared after URL normalization, so `GitHub.com` and an
    /// explicit `:443` on https both count as `github.com`.
    pub fn from_homepage(homepage: &str) -> Result<Self, Unresolved> {
        let url = Url::parse(homepage.trim()).map_err(|_| Unresolved::MalformedUrl)?;

        if url.host_str() != Some(TRUSTED_HOST) {
            return Err(Unresolved::UntrustedHost);
        }

        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty());

        match (segments.next(), segments.next()) {
            (Some(owner), Some(repo)) => {
                let repo = repo.strip_suffix(".git").unwrap_or(repo);
                if repo.is_empty() {
                    return Err(Unresolved::IncompleteRepoPath);
                }
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(Unresolved::IncompleteRepoPath),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_and_repo() {
        let repo = GitHubRepo::from_homepage("https://github.com/ownerA/repoB").unwrap();
        assert_eq!(repo.owner, "ownerA");
        assert_eq!(repo.repo, "repoB");
    }

    #[test]
    fn test_extra_segments_and_slashes() {
        let repo = GitHubRepo::from_homepage("https://github.com//psf//requests/tree/main/").unwrap();
        assert_eq!(
            repo,
            GitHubRepo {
                owner: "psf".to_string(),
                repo: "requests".to_string()
            }
        );
    }

    #[test]
    fn test_git_suffix_dropped() {
        let repo = GitHubRepo::from_homepage("http://github.com/pallets/flask.git").unwrap();
        assert_eq!(repo.repo, "flask");
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(
            GitHubRepo::from_homepage("https://github.com/onlyonepart"),
            Err(Unresolved::IncompleteRepoPath)
        );
        assert_eq!(
            GitHubRepo::from_homepage("https://github.com/"),
            Err(Unresolved::IncompleteRepoPath)
        );
    }

    #[test]
    fn test_other_hosts() {
        assert_eq!(
            GitHubRepo::from_homepage("https://gitlab.com/owner/repo"),
            Err(Unresolved::UntrustedHost)
        );
        assert_eq!(
            GitHubRepo::from_homepage("https://www.github.com/owner/repo"),
            Err(Unresolved::UntrustedHost)
        );
    }

    #[test]
    fn test_host_is_normalized() {
        let repo = GitHubRepo::from_homepage("https://GitHub.com/psf/requests").unwrap();
        assert_eq!(repo.owner, "psf");
        assert!(GitHubRepo::from_homepage("https://github.com:443/psf/requests").is_ok());
    }

    #[test]
    fn test_display() {
        let repo = GitHubRepo::from_homepage("https://github.com/psf/requests").unwrap();
        assert_eq!(repo.to_string(), "psf/requests");
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(
            GitHubRepo::from_homepage("github.com/owner/repo"),
            Err(Unresolved::MalformedUrl)
        );
    }
}
