use std::fmt;

use gate_graphql::GraphQLServiceError;
use http::StatusCode;
use thiserror::Error;

/// GateClientError represents all possible failures that can occur during a client request.
#[derive(Error, Debug)]
pub enum GateClientError {
    /// The API answered the query with GraphQL errors.
    #[error("{msg}")]
    GraphQL {
        /// The rendered error messages.
        msg: String,
    },

    /// The token was rejected.
    #[error("Bad credentials. Check that the token is valid and has the read:org scope.")]
    InvalidCredentials,

    /// The user login does not resolve to an account.
    #[error("Could not resolve to a User with the login of '{login}'.")]
    UserNotFound {
        /// The login that was looked up.
        login: String,
    },

    /// The organization login does not resolve to an organization.
    #[error("Could not resolve to an Organization with the login of '{organization}'.")]
    OrganizationNotFound {
        /// The login that was looked up.
        organization: String,
    },

    /// The API returned a shape the query does not allow.
    #[error("The response from the GitHub API was malformed: `{null_field}` was null.")]
    MalformedResponse {
        /// The field that should have been present.
        null_field: String,
    },

    /// GitHub answered with a failing status and explained it in the body.
    #[error("{msg}")]
    GitHubApi {
        /// The status GitHub answered with.
        status_code: StatusCode,
        /// GitHub's message, or the status when there was none.
        msg: String,
    },

    /// The request never produced a usable response.
    #[error("GitHub API request failed: {source}")]
    Service {
        /// The underlying failure.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The underlying service could not become ready.
    #[error("The GitHub API client could not be prepared: {}", .0)]
    ServiceReady(Box<dyn std::error::Error + Send + Sync>),
}

impl<T> From<GraphQLServiceError<T>> for GateClientError
where
    T: Send + Sync + fmt::Debug + 'static,
{
    fn from(error: GraphQLServiceError<T>) -> Self {
        match error {
            GraphQLServiceError::NoData(_) | GraphQLServiceError::PartialError { .. } => {
                GateClientError::GraphQL {
                    msg: error.to_string(),
                }
            }
            GraphQLServiceError::InvalidCredentials => GateClientError::InvalidCredentials,
            GraphQLServiceError::BadStatusCode { status_code, .. } => GateClientError::GitHubApi {
                status_code,
                msg: error.to_string(),
            },
            error => GateClientError::Service {
                source: Box::new(error),
            },
        }
    }
}
