use tower::{Service, ServiceExt};

use crate::GateClientError;

use super::types::{TeamMembership, TeamMembershipInput, TeamsPage, TeamsPageRequest};

/// Pages through every team `input.username` belongs to in `input.organization`,
/// then checks the accumulated list against `input.targets`.
///
/// Membership is only evaluated once the API reports no further pages.
pub async fn run<S>(
    input: TeamMembershipInput,
    service: &mut S,
) -> Result<TeamMembership, GateClientError>
where
    S: Service<TeamsPageRequest, Response = TeamsPage, Error = GateClientError>,
{
    let mut teams: Vec<String> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let request = TeamsPageRequest {
            organization: input.organization().clone(),
            username: input.username().clone(),
            cursor: cursor.take(),
            page_size: *input.page_size(),
        };
        let page = service.ready().await?.call(request).await?;
        pages += 1;
        tracing::debug!(
            page = pages,
            teams = page.teams.len(),
            has_next_page = page.has_next_page,
            "received a page of teams"
        );
        teams.extend(page.teams);

        if !page.has_next_page {
            break;
        }
        match page.end_cursor {
            Some(end_cursor) => cursor = Some(end_cursor),
            // without a cursor the next request would start over from the first page
            None => {
                return Err(GateClientError::MalformedResponse {
                    null_field: "organization.teams.pageInfo.endCursor".to_string(),
                });
            }
        }
    }

    let is_team_member = input.targets().matches_any(&teams);
    tracing::debug!(pages, ?teams, is_team_member, "resolved team membership");
    Ok(TeamMembership {
        teams,
        is_team_member,
    })
}
