use clap::Parser;
use gate_client::operations::membership::{
    TargetTeams, TeamMembershipInput, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use gate_github::Token;

use super::{non_blank, required, InputError};
use crate::utils::context::GitHubContext;

#[derive(Debug, Clone, Parser)]
pub struct MembershipOpts {
    /// Token used to query the GitHub GraphQL API. It needs the read:org scope.
    #[arg(long = "github-token", env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Organization that owns the teams. Defaults to the owner of the workflow's repository.
    #[arg(long, env = "INPUT_ORGANIZATION")]
    organization: Option<String>,

    /// Login of the user whose teams are checked
    #[arg(long, env = "INPUT_USERNAME")]
    username: Option<String>,

    /// Comma-separated team names; matching ignores case
    #[arg(long, env = "INPUT_TEAM")]
    team: Option<String>,

    /// Number of teams requested per GraphQL page
    #[arg(
        long = "page-size",
        env = "INPUT_PAGE-SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(i64).range(1..=MAX_PAGE_SIZE)
    )]
    page_size: i64,
}

impl MembershipOpts {
    pub fn token(&self) -> Result<Token, InputError> {
        required(&self.github_token, "GITHUB_TOKEN").map(Token::new)
    }

    /// Resolves the organization, falling back to the repository owner when the input is blank
    pub fn organization(&self, context: &GitHubContext) -> Result<String, InputError> {
        non_blank(&self.organization)
            .or_else(|| context.repository_owner().map(str::to_string))
            .ok_or(InputError::MissingOrganization)
    }

    pub fn input(&self, context: &GitHubContext) -> Result<TeamMembershipInput, InputError> {
        let organization = self.organization(context)?;
        let username = required(&self.username, "username")?;
        let team = required(&self.team, "team")?;

        Ok(TeamMembershipInput::builder()
            .organization(organization)
            .username(username)
            .targets(TargetTeams::parse(&team))
            .page_size(self.page_size)
            .build())
    }
}
