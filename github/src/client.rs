//! GitHub API client implementation

use crate::error::GithubError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("stack-analysis/", env!("CARGO_PKG_VERSION"));

/// One file located in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Base name of the file, as requested
    pub filename: String,
    /// Path of the file within the repository
    pub filepath: String,
    /// Decoded file content
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeNode>,
}

#[derive(Debug, Deserialize)]
struct TreeNode {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
}

/// GitHub API client
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubClient {
    /// Create an anonymous client against the public GitHub API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }

    /// Create a client picking up `GITHUB_TOKEN` from the environment.
    ///
    /// Falls back to anonymous access when the variable is not set;
    /// anonymous requests work but are rate limited much harder.
    #[must_use]
    pub fn from_env() -> Self {
        let mut client = Self::new();
        client.token = std::env::var("GITHUB_TOKEN").ok();
        client
    }

    /// Override the API base URL. Intended for tests against a mock server.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set an explicit bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fetch every file named `filename` from a repository.
    ///
    /// Looks the file up anywhere in the branch's tree, so a `pom.xml` in a
    /// subdirectory is found as well as one at the root. With no `branch`
    /// given, the repository's default branch is used. Entries come back in
    /// tree order, each carrying the file name, its repository path, and
    /// the decoded content.
    ///
    /// A missing repository, branch, or file is not an error: the result is
    /// simply empty.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] for unparseable repository URLs, transport
    /// failures, auth/rate-limit rejections, and undecodable responses.
    pub async fn fetch_file(
        &self,
        repo_url: &str,
        filename: &str,
        branch: Option<&str>,
    ) -> Result<Vec<FileEntry>, GithubError> {
        let (owner, repo) = parse_repo_url(repo_url)?;

        let git_ref = match branch {
            Some(name) => name.to_string(),
            None => match self.default_branch(owner, repo).await? {
                Some(name) => name,
                None => return Ok(Vec::new()),
            },
        };

        let Some(tree) = self.branch_tree(owner, repo, &git_ref).await? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for node in tree {
            if node.kind != "blob" || node.path.rsplit('/').next() != Some(filename) {
                continue;
            }
            if let Some(content) = self.file_content(owner, repo, &node.path, &git_ref).await? {
                entries.push(FileEntry {
                    filename: filename.to_string(),
                    filepath: node.path,
                    content,
                });
            }
        }
        debug!(owner, repo, filename, %git_ref, matches = entries.len(), "fetched file from github");
        Ok(entries)
    }

    /// The repository's default branch, or `None` when the repository
    /// does not exist.
    async fn default_branch(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<String>, GithubError> {
        let url = format!("{}/repos/{owner}/{repo}", self.api_url);
        let info: Option<RepoInfo> = self.get_json(&url).await?;
        Ok(info.map(|i| i.default_branch))
    }

    /// The full recursive tree of a branch, or `None` when the repository
    /// or branch does not exist.
    async fn branch_tree(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
    ) -> Result<Option<Vec<TreeNode>>, GithubError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/git/trees/{git_ref}?recursive=1",
            self.api_url
        );
        let response: Option<TreeResponse> = self.get_json(&url).await?;
        Ok(response.map(|r| r.tree))
    }

    /// Decoded content of one file, or `None` when the path has vanished
    /// between the tree listing and the content fetch.
    async fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>, GithubError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/contents/{path}?ref={git_ref}",
            self.api_url
        );
        let response: Option<ContentsResponse> = self.get_json(&url).await?;
        match response {
            Some(contents) => decode_content(path, &contents.content).map(Some),
            None => Ok(None),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, GithubError> {
        let mut request = self
            .client
            .get(url)
            .header("accept", "application/vnd.github+json")
            .header("user-agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GithubError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let parsed = response
                    .json::<T>()
                    .await
                    .map_err(|e| GithubError::ResponseParseFailed(e.to_string()))?;
                Ok(Some(parsed))
            }
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GithubError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(GithubError::RateLimited),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GithubError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

/// Extract `(owner, repo)` from an `https://github.com/...` repository URL.
/// A trailing slash or `.git` suffix is tolerated.
fn parse_repo_url(repo_url: &str) -> Result<(&str, &str), GithubError> {
    let invalid = || GithubError::InvalidRepoUrl(repo_url.to_string());

    let trimmed = repo_url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    let mut parts = trimmed.split('/');
    if parts.next() != Some("github.com") {
        return Err(invalid());
    }
    let owner = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let repo = parts
        .next()
        .map(|s| s.trim_end_matches(".git"))
        .filter(|s| !s.is_empty())
        .ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((owner, repo))
}

/// GitHub serves blob content base64-encoded with embedded line breaks;
/// strip the whitespace before decoding.
fn decode_content(path: &str, raw: &str) -> Result<String, GithubError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(cleaned)
        .map_err(|e| GithubError::ContentDecode {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| GithubError::ContentDecode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_url_plain() {
        let parsed = parse_repo_url("https://github.com/ravsa/testManifest");

        assert_eq!(parsed.ok(), Some(("ravsa", "testManifest")));
    }

    #[test]
    fn test_parse_repo_url_tolerates_suffixes() {
        assert_eq!(
            parse_repo_url("https://github.com/ravsa/testManifest/").ok(),
            Some(("ravsa", "testManifest"))
        );
        assert_eq!(
            parse_repo_url("https://github.com/ravsa/testManifest.git").ok(),
            Some(("ravsa", "testManifest"))
        );
    }

    #[test]
    fn test_parse_repo_url_rejects_other_hosts_and_shapes() {
        assert!(parse_repo_url("https://gitlab.com/ravsa/testManifest").is_err());
        assert!(parse_repo_url("https://github.com/ravsa").is_err());
        assert!(parse_repo_url("https://github.com/ravsa/repo/extra").is_err());
        assert!(parse_repo_url("not a url").is_err());
    }

    #[test]
    fn test_decode_content_strips_line_breaks() {
        let encoded = "PHByb2pl\nY3Q+PC9w\ncm9qZWN0\nPg==\n";

        let decoded = decode_content("pom.xml", encoded);

        assert_eq!(decoded.ok().as_deref(), Some("<project></project>"));
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        assert!(decode_content("pom.xml", "not base64 at all!!!").is_err());
    }
}
