mod runner;
mod service;
mod types;

pub use runner::run;
pub use service::{user_teams_query, UserTeams, UserTeamsQuery};
pub use types::{
    TargetTeams, TeamMembership, TeamMembershipInput, TeamsPage, TeamsPageRequest,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
