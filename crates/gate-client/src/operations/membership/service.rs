use std::{future::Future, pin::Pin};

use gate_graphql::{GraphQLRequest, GraphQLServiceError};
use graphql_client::GraphQLQuery;
use tower::Service;

use crate::GateClientError;

use super::types::{TeamsPage, TeamsPageRequest};

#[derive(GraphQLQuery)]
// The paths are relative to the directory where your `Cargo.toml` is located.
#[graphql(
    query_path = "src/operations/membership/user_teams_query.graphql",
    schema_path = ".schema/github.graphql",
    response_derives = "Eq, PartialEq, Debug, Serialize, Deserialize",
    variables_derives = "Debug, PartialEq",
    deprecated = "warn"
)]
/// This struct is used to generate the module containing `Variables` and
/// `ResponseData` structs.
/// Snake case of this name is the mod name. i.e. user_teams_query
pub struct UserTeamsQuery;

impl From<TeamsPageRequest> for user_teams_query::Variables {
    fn from(req: TeamsPageRequest) -> Self {
        user_teams_query::Variables {
            cursor: req.cursor,
            first: req.page_size,
            org: req.organization,
            user_logins: Some(vec![req.username.clone()]),
            username: req.username,
        }
    }
}

/// Fetches one page of the teams a user belongs to within an organization
#[derive(Clone)]
pub struct UserTeams<S: Clone> {
    inner: S,
}

impl<S: Clone> UserTeams<S> {
    pub fn new(inner: S) -> UserTeams<S> {
        UserTeams { inner }
    }
}

impl<S, Fut> Service<TeamsPageRequest> for UserTeams<S>
where
    S: Service<
            GraphQLRequest<UserTeamsQuery>,
            Response = user_teams_query::ResponseData,
            Error = GraphQLServiceError<user_teams_query::ResponseData>,
            Future = Fut,
        > + Clone
        + Send
        + 'static,
    Fut: Future<Output = Result<S::Response, S::Error>> + Send,
{
    type Response = TeamsPage;
    type Error = GateClientError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        tower::Service::<GraphQLRequest<UserTeamsQuery>>::poll_ready(&mut self.inner, cx)
            .map_err(|err| GateClientError::ServiceReady(Box::new(err)))
    }

    fn call(&mut self, req: TeamsPageRequest) -> Self::Future {
        let mut inner = gate_tower::service::replace_ready_service(&mut self.inner);
        let fut = async move {
            let username = req.username.clone();
            let organization = req.organization.clone();
            let variables = user_teams_query::Variables::from(req);
            tracing::trace!(?variables);
            let response_data = inner
                .call(GraphQLRequest::<UserTeamsQuery>::new(variables))
                .await
                .map_err(GateClientError::from)?;
            page_from_response_data(&username, &organization, response_data)
        };
        Box::pin(fut)
    }
}

fn page_from_response_data(
    username: &str,
    organization: &str,
    response_data: user_teams_query::ResponseData,
) -> Result<TeamsPage, GateClientError> {
    if response_data.user.is_none() {
        return Err(GateClientError::UserNotFound {
            login: username.to_string(),
        });
    }
    let teams = response_data
        .organization
        .ok_or_else(|| GateClientError::OrganizationNotFound {
            organization: organization.to_string(),
        })?
        .teams;

    Ok(TeamsPage {
        teams: teams
            .nodes
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|team| team.name)
            .collect(),
        has_next_page: teams.page_info.has_next_page,
        end_cursor: teams.page_info.end_cursor,
    })
}
