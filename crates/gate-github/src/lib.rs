//! Authenticated access to the GitHub API for the team-gate service stack

use std::fmt;

use buildstructor::buildstructor;
use gate_http::extend_headers::{ExtendHeaders, ExtendHeadersLayer};
use http::{header, HeaderMap, HeaderValue};
use tower::Layer;

const CLIENT_NAME: &str = "team-gate";

/// A GitHub token. Never printed, not even through [`fmt::Debug`]
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Token {
        Token(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GitHubLayerError {
    #[error("the GitHub token contains characters that cannot be sent in a header")]
    InvalidToken(#[source] http::header::InvalidHeaderValue),
    #[error("the client version contains characters that cannot be sent in a header")]
    InvalidVersion(#[source] http::header::InvalidHeaderValue),
}

/// [`Layer`] that attaches GitHub credentials and client identification to every request
#[derive(Clone, Debug)]
pub struct GitHubServiceLayer {
    inner: ExtendHeadersLayer,
}

#[buildstructor]
impl GitHubServiceLayer {
    #[builder]
    pub fn new(token: Token, client_version: String) -> Result<GitHubServiceLayer, GitHubLayerError> {
        let mut headers = HeaderMap::new();

        // GitHub rejects API requests that do not identify the calling client
        tracing::debug!(?client_version);
        let user_agent = HeaderValue::from_str(&format!("{CLIENT_NAME}/{client_version}"))
            .map_err(GitHubLayerError::InvalidVersion)?;
        headers.insert(header::USER_AGENT, user_agent);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let mut authorization = HeaderValue::from_str(&format!("bearer {}", token.expose().trim()))
            .map_err(GitHubLayerError::InvalidToken)?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);

        Ok(GitHubServiceLayer {
            inner: ExtendHeadersLayer::new(headers),
        })
    }
}

impl<S: Clone> Layer<S> for GitHubServiceLayer {
    type Service = GitHubService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        self.inner.layer(inner)
    }
}

/// Service produced by [`GitHubServiceLayer`]
pub type GitHubService<S> = ExtendHeaders<S>;
