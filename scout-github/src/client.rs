//! GitHub API client struct and builder.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use scout_proto::{CancellationToken, LookupError, Profile, ProfileLookup, SearchQuery};

use crate::error::{map_http_status, map_reqwest_error};

/// Default GitHub REST API base URL.
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// GitHub rejects requests that carry no `User-Agent`.
const DEFAULT_USER_AGENT: &str = concat!("scout/", env!("CARGO_PKG_VERSION"));

/// Media type for the v3 REST API.
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Pinned REST API version header value.
const API_VERSION: &str = "2022-11-28";

/// Environment variable overriding the base URL (GitHub Enterprise, mocks).
pub const ENV_API_URL: &str = "GITHUB_API_URL";

/// Environment variable holding an optional access token.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

/// Client for the GitHub users API.
///
/// Implements [`ProfileLookup`] by calling `GET /users/{login}`.
///
/// # Example
///
/// ```no_run
/// use scout_github::GitHub;
/// use std::time::Duration;
///
/// let client = GitHub::new()
///     .user_agent("my-app/1.0")
///     .timeout(Duration::from_secs(10));
/// ```
pub struct GitHub {
    /// API base URL (override for testing or GitHub Enterprise).
    pub(crate) base_url: String,
    /// Value of the `User-Agent` header.
    pub(crate) user_agent: String,
    /// Optional bearer token; raises the anonymous rate limit.
    pub(crate) token: Option<String>,
    /// Optional per-request deadline.
    pub(crate) timeout: Option<Duration>,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl GitHub {
    /// Create a new client with sensible defaults.
    ///
    /// Default base URL: `https://api.github.com`.
    /// No token, no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            token: None,
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client configured from `GITHUB_API_URL` and `GITHUB_TOKEN`.
    ///
    /// Unset or empty variables fall back to the defaults of [`GitHub::new`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let set = |name: &str| var(name).filter(|v: &String| !v.trim().is_empty());
        let mut client = Self::new();
        if let Some(url) = set(ENV_API_URL) {
            client = client.base_url(url);
        }
        if let Some(token) = set(ENV_TOKEN) {
            client = client.token(token);
        }
        client
    }

    /// Override the API base URL.
    ///
    /// Useful for testing with a local mock server or a GitHub Enterprise
    /// instance (`https://host/api/v3`).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Authenticate requests with a bearer token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Give up on a request after `timeout`, failing with [`LookupError::Timeout`].
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the profile URL for `login`.
    ///
    /// The login is pushed as a single path segment, so separators and
    /// spaces are percent-encoded rather than interpreted.
    pub(crate) fn user_url(&self, login: &str) -> Result<reqwest::Url, LookupError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| LookupError::Network(format!("invalid base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| LookupError::Network(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("users")
            .push(login);
        Ok(url)
    }
}

impl Default for GitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileLookup for GitHub {
    /// Fetch `/users/{login}`, racing the request against `cancel`.
    ///
    /// When the token fires first the request future is dropped, which
    /// aborts the underlying connection, and the fetch resolves with
    /// [`LookupError::Cancelled`].
    fn fetch(
        &self,
        query: &SearchQuery,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Profile, LookupError>> + Send {
        let login = query.to_string();
        let url = self.user_url(&login);
        let user_agent = self.user_agent.clone();
        let token = self.token.clone();
        let timeout = self.timeout;
        let http_client = self.client.clone();

        async move {
            let url = url?;
            tracing::debug!(url = %url, login = %login, "fetching profile");

            let mut request = http_client
                .get(url)
                .header(ACCEPT, GITHUB_JSON)
                .header(USER_AGENT, user_agent)
                .header("X-GitHub-Api-Version", API_VERSION);
            if let Some(token) = token {
                request = request.bearer_auth(token);
            }
            if let Some(timeout) = timeout {
                request = request.timeout(timeout);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(login = %login, "profile fetch cancelled");
                    Err(LookupError::Cancelled)
                }
                result = send(request, &login) => result,
            }
        }
    }
}

async fn send(request: reqwest::RequestBuilder, login: &str) -> Result<Profile, LookupError> {
    let response = request.send().await.map_err(map_reqwest_error)?;

    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        return Err(map_http_status(status, &body, login));
    }

    serde_json::from_str(&body)
        .map_err(|e| LookupError::InvalidResponse(format!("invalid JSON response: {e}")))
}
