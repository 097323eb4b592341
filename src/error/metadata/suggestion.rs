use std::fmt::{self, Display};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Suggestion {
    CheckToken,
    CheckUsername { login: String },
    CheckOrganization { organization: String },
    CheckInputs,
    CheckConnectivity,
    CheckGitHubStatus,
    SetInput { name: String },
    SubmitIssue,
}

impl Display for Suggestion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suggestion = match self {
            Suggestion::CheckToken => {
                "Check that the token passed as GITHUB_TOKEN is valid and has the read:org scope.".to_string()
            }
            Suggestion::CheckUsername { login } => {
                format!("Check that '{}' is the login of an existing GitHub user.", login)
            }
            Suggestion::CheckOrganization { organization } => format!(
                "Check that '{}' is an organization the token can read.",
                organization
            ),
            Suggestion::CheckInputs => {
                "Check that the username and organization exist and that the token can read them.".to_string()
            }
            Suggestion::CheckConnectivity => {
                "Check that the GitHub GraphQL API is reachable from this runner.".to_string()
            }
            Suggestion::CheckGitHubStatus => {
                "GitHub failed to answer the request. Check https://www.githubstatus.com and re-run the job.".to_string()
            }
            Suggestion::SetInput { name } => {
                format!("Set the `{}` input on this step.", name)
            }
            Suggestion::SubmitIssue => {
                "This error was unexpected! Please submit an issue with any relevant details about what you were trying to do.".to_string()
            }
        };
        write!(formatter, "{}", &suggestion)
    }
}
