use std::fmt;

use buildstructor::Builder;
use derive_getters::Getters;

/// Teams requested per page when the caller does not say otherwise
pub const DEFAULT_PAGE_SIZE: i64 = 100;
/// Largest `first:` argument GitHub accepts on a connection
pub const MAX_PAGE_SIZE: i64 = 100;

/// The team names a user is checked against, normalized for case-insensitive matching
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TargetTeams(Vec<String>);

impl TargetTeams {
    /// Parses a comma-separated list: the whole value is trimmed and lowercased,
    /// then split on commas, and each entry is trimmed. Empty entries are dropped.
    pub fn parse(raw: &str) -> TargetTeams {
        TargetTeams(
            raw.trim()
                .to_lowercase()
                .split(',')
                .map(str::trim)
                .filter(|team| !team.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Whether `team` names one of the targets, ignoring case
    pub fn contains(&self, team: &str) -> bool {
        let team = team.to_lowercase();
        self.0.iter().any(|target| target == &team)
    }

    /// Whether any of `teams` names one of the targets
    pub fn matches_any<T: AsRef<str>>(&self, teams: &[T]) -> bool {
        teams.iter().any(|team| self.contains(team.as_ref()))
    }
}

impl fmt::Display for TargetTeams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// Everything needed to resolve one user's membership
#[derive(Builder, Clone, Debug, Eq, Getters, PartialEq)]
pub struct TeamMembershipInput {
    organization: String,
    username: String,
    targets: TargetTeams,
    page_size: i64,
}

/// The outcome of a membership lookup
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TeamMembership {
    /// Every team the user belongs to, in the order the API returned them
    pub teams: Vec<String>,
    /// Whether any of `teams` is one of the targets
    pub is_team_member: bool,
}

/// One page of the user's teams
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TeamsPageRequest {
    pub organization: String,
    pub username: String,
    /// `None` requests the first page
    pub cursor: Option<String>,
    pub page_size: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TeamsPage {
    pub teams: Vec<String>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}
