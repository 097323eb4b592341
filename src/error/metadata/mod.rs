mod suggestion;

pub use suggestion::Suggestion;

use gate_client::GateClientError;
use gate_github::GitHubLayerError;

use crate::options::InputError;

/// Metadata contains extra information about specific errors.
/// Currently this is an optional `Suggestion`.
#[derive(Default, Debug)]
pub struct Metadata {
    pub suggestion: Option<Suggestion>,
}

/// `Metadata` structs can be created from an `anyhow::Error`
/// This works by downcasting the errors to their underlying types
/// and creating `Suggestion`s where applicable
impl From<&mut anyhow::Error> for Metadata {
    fn from(error: &mut anyhow::Error) -> Self {
        if let Some(client_error) = error.downcast_ref::<GateClientError>() {
            let suggestion = match client_error {
                GateClientError::InvalidCredentials => Suggestion::CheckToken,
                GateClientError::UserNotFound { login } => Suggestion::CheckUsername {
                    login: login.clone(),
                },
                GateClientError::OrganizationNotFound { organization } => {
                    Suggestion::CheckOrganization {
                        organization: organization.clone(),
                    }
                }
                GateClientError::GraphQL { .. } => Suggestion::CheckInputs,
                GateClientError::GitHubApi { status_code, .. } if status_code.is_server_error() => {
                    Suggestion::CheckGitHubStatus
                }
                GateClientError::GitHubApi { .. } => Suggestion::CheckToken,
                GateClientError::Service { .. } | GateClientError::ServiceReady(_) => {
                    Suggestion::CheckConnectivity
                }
                GateClientError::MalformedResponse { .. } => Suggestion::SubmitIssue,
            };
            return Metadata {
                suggestion: Some(suggestion),
            };
        }

        if let Some(input_error) = error.downcast_ref::<InputError>() {
            let name = match input_error {
                InputError::Missing { name } => name.clone(),
                InputError::MissingOrganization => "organization".to_string(),
            };
            return Metadata {
                suggestion: Some(Suggestion::SetInput { name }),
            };
        }

        if let Some(GitHubLayerError::InvalidToken(_)) = error.downcast_ref::<GitHubLayerError>()
        {
            return Metadata {
                suggestion: Some(Suggestion::CheckToken),
            };
        }

        Metadata::default()
    }
}
