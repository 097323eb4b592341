use std::time::Duration;

use buildstructor::buildstructor;
use derive_getters::Getters;
use gate_client::operations::membership::UserTeams;
use gate_github::{GitHubService, GitHubServiceLayer, Token};
use gate_graphql::{GraphQLLayer, GraphQLService};
use gate_http::{HttpService, HttpServiceConfig, HttpServiceFactory, ReqwestServiceFactory};
use tower::ServiceBuilder;
use url::Url;

use crate::{GateResult, PKG_NAME, PKG_VERSION};

/// GitHub's public GraphQL endpoint
pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// The page service that [`GitHubClientConfig::user_teams`] assembles
pub type UserTeamsService = UserTeams<GraphQLService<GitHubService<HttpService>>>;

/// Everything needed to build the services that talk to GitHub
#[derive(Clone, Debug, Getters)]
pub struct GitHubClientConfig {
    endpoint: Url,
    version: String,
    #[getter(skip)]
    http: ReqwestServiceFactory,
}

#[buildstructor]
impl GitHubClientConfig {
    #[builder]
    pub fn new(
        override_endpoint: Option<String>,
        timeout: Option<Duration>,
    ) -> GateResult<GitHubClientConfig> {
        let version = if cfg!(debug_assertions) {
            format!("{} (dev)", PKG_VERSION)
        } else {
            PKG_VERSION.to_string()
        };
        let endpoint = override_endpoint.as_deref().unwrap_or(GITHUB_GRAPHQL_ENDPOINT);
        let endpoint = Url::parse(endpoint)?;
        let http = ReqwestServiceFactory::builder()
            .config(
                HttpServiceConfig::builder()
                    .and_timeout(timeout)
                    .user_agent(format!("{}/{}", PKG_NAME, version))
                    .build(),
            )
            .build()?;

        Ok(GitHubClientConfig {
            endpoint,
            version,
            http,
        })
    }

    /// A plain HTTP service, without GitHub credentials attached.
    /// Every service shares one connection pool.
    pub fn http_service(&self) -> GateResult<HttpService> {
        Ok(self.http.create()?)
    }

    /// The authenticated service that fetches one page of a user's teams per call
    pub fn user_teams(&self, token: Token) -> GateResult<UserTeamsService> {
        let github_layer = GitHubServiceLayer::builder()
            .token(token)
            .client_version(self.version.clone())
            .build()?;
        let service = ServiceBuilder::new()
            .layer(GraphQLLayer::new(self.endpoint.clone()))
            .layer(github_layer)
            .service(self.http_service()?);
        Ok(UserTeams::new(service))
    }
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;

    #[test]
    fn it_defaults_to_the_public_endpoint() {
        let config = GitHubClientConfig::builder().build().unwrap();
        assert_that!(config.endpoint().as_str()).is_equal_to(GITHUB_GRAPHQL_ENDPOINT);
    }

    #[test]
    fn it_accepts_an_endpoint_override() {
        let config = GitHubClientConfig::builder()
            .override_endpoint("http://localhost:4000/graphql")
            .build()
            .unwrap();
        assert_that!(config.endpoint().as_str()).is_equal_to("http://localhost:4000/graphql");
    }

    #[test]
    fn it_rejects_an_invalid_endpoint() {
        let config = GitHubClientConfig::builder()
            .override_endpoint("not a url")
            .build();
        assert_that!(config).is_err();
    }
}
