use camino::Utf8PathBuf;
use derive_getters::Getters;

use crate::utils::env::{GateEnv, GateEnvKey};
use crate::GateResult;

/// The values the Actions runner provides to every step, read once
/// at startup and passed to whatever needs them.
#[derive(Clone, Debug, Default, Eq, Getters, PartialEq)]
pub struct GitHubContext {
    /// `owner/repo` of the workflow's repository
    repository: Option<String>,
    graphql_url: Option<String>,
    /// file the step appends its outputs to
    output_file: Option<Utf8PathBuf>,
    subscription_url: Option<String>,
}

impl GitHubContext {
    pub fn from_env(env_store: &GateEnv) -> GateResult<GitHubContext> {
        let context = GitHubContext {
            repository: env_store.get(GateEnvKey::GithubRepository)?,
            graphql_url: env_store.get(GateEnvKey::GithubGraphqlUrl)?,
            output_file: env_store
                .get(GateEnvKey::GithubOutput)?
                .map(Utf8PathBuf::from),
            subscription_url: env_store.get(GateEnvKey::TeamGateSubscriptionUrl)?,
        };
        tracing::debug!(?context);
        Ok(context)
    }

    /// The organization that owns the workflow's repository
    pub fn repository_owner(&self) -> Option<&str> {
        self.repository
            .as_deref()
            .and_then(|repository| repository.split('/').next())
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use speculoos::prelude::*;

    use super::*;

    #[test]
    fn it_reads_every_key() {
        let mut env_store = GateEnv::new();
        env_store.insert(GateEnvKey::GithubRepository, "octo-org/octo-repo");
        env_store.insert(GateEnvKey::GithubGraphqlUrl, "http://localhost:4000/graphql");
        env_store.insert(GateEnvKey::GithubOutput, "/tmp/github_output");
        env_store.insert(GateEnvKey::TeamGateSubscriptionUrl, "http://localhost:5000");

        let context = GitHubContext::from_env(&env_store).unwrap();

        assert_that!(context).is_equal_to(GitHubContext {
            repository: Some("octo-org/octo-repo".to_string()),
            graphql_url: Some("http://localhost:4000/graphql".to_string()),
            output_file: Some(Utf8PathBuf::from("/tmp/github_output")),
            subscription_url: Some("http://localhost:5000".to_string()),
        });
    }

    #[test]
    fn it_allows_everything_to_be_unset() {
        let context = GitHubContext::from_env(&GateEnv::new()).unwrap();
        assert_that!(context).is_equal_to(GitHubContext::default());
    }

    #[rstest]
    #[case::owner_and_repo(Some("octo-org/octo-repo"), Some("octo-org"))]
    #[case::owner_only(Some("octo-org"), Some("octo-org"))]
    #[case::missing_owner(Some("/octo-repo"), None)]
    #[case::unset(None, None)]
    fn it_finds_the_repository_owner(
        #[case] repository: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let context = GitHubContext {
            repository: repository.map(str::to_string),
            ..Default::default()
        };
        assert_that!(context.repository_owner()).is_equal_to(expected);
    }
}
