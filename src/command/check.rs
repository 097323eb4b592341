use clap::Parser;
use gate_client::operations::membership;
use gate_client::operations::subscription::{
    SubscriptionCheck, SubscriptionCheckRequest, SubscriptionStatus, DEFAULT_SUBSCRIPTION_API_URL,
};
use tower::{Service, ServiceExt};
use url::Url;

use crate::command::{ExitSignal, Outcome, OutputSink, StepOutputs};
use crate::options::{MembershipOpts, SubscriptionOpt};
use crate::utils::{client::GitHubClientConfig, context::GitHubContext};
use crate::GateResult;

#[derive(Debug, Clone, Parser)]
pub struct Check {
    #[command(flatten)]
    membership: MembershipOpts,

    #[command(flatten)]
    subscription: SubscriptionOpt,
}

impl Check {
    pub async fn run(
        &self,
        context: &GitHubContext,
        client_config: &GitHubClientConfig,
    ) -> GateResult<Outcome> {
        if self.subscription.validate_subscription {
            if let Some(signal) = self.check_subscription(context, client_config).await? {
                return Ok(Outcome::Terminated(signal));
            }
        }

        let input = self.membership.input(context)?;
        let token = self.membership.token()?;
        tracing::info!(
            "Getting teams for {} in org {}. Will check if belongs to one of [{}]",
            input.username(),
            input.organization(),
            input.targets()
        );

        let username = input.username().clone();
        let mut service = client_config.user_teams(token)?;
        let membership = membership::run(input, &mut service).await?;

        let outputs = StepOutputs::from(membership);
        outputs.write(&OutputSink::for_context(context))?;
        tracing::info!(
            "{} belongs to {} team(s): [{}]. isTeamMember: {}",
            username,
            outputs.teams().len(),
            outputs.teams().join(","),
            outputs.is_team_member()
        );
        Ok(Outcome::Completed(outputs))
    }

    /// Returns the signal to stop on, or `None` when the run may continue
    async fn check_subscription(
        &self,
        context: &GitHubContext,
        client_config: &GitHubClientConfig,
    ) -> GateResult<Option<ExitSignal>> {
        let Some(repository) = context.repository() else {
            tracing::warn!("GITHUB_REPOSITORY is not set, skipping the subscription check.");
            return Ok(None);
        };
        let base_url = context
            .subscription_url()
            .as_deref()
            .unwrap_or(DEFAULT_SUBSCRIPTION_API_URL);
        let mut service = SubscriptionCheck::new(client_config.http_service()?, Url::parse(base_url)?);

        let status = service
            .ready()
            .await?
            .call(SubscriptionCheckRequest {
                repository: repository.clone(),
            })
            .await?;

        match status {
            SubscriptionStatus::Active => Ok(None),
            SubscriptionStatus::Inactive => Ok(Some(ExitSignal::SubscriptionInvalid)),
            SubscriptionStatus::Unverified { reason } => {
                tracing::debug!(%reason, "subscription could not be verified");
                tracing::info!("Timeout or API not reachable. Continuing to next step.");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use camino::Utf8PathBuf;
    use httpmock::{Method::GET, Method::POST, MockServer};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use speculoos::prelude::*;

    use super::*;
    use crate::utils::env::{GateEnv, GateEnvKey};

    fn check(args: &[&str]) -> Check {
        let base = [
            "team-gate",
            "--github-token",
            "ghp_test",
            "--organization",
            "octo-org",
            "--username",
            "octocat",
            "--team",
            "Engineering",
        ];
        Check::try_parse_from(base.iter().chain(args.iter()).copied()).unwrap()
    }

    fn page(teams: &[&str], has_next_page: bool, end_cursor: Option<&str>) -> serde_json::Value {
        json!({
            "data": {
                "user": { "id": "MDQ6VXNlcjE=" },
                "organization": {
                    "teams": {
                        "nodes": teams.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>(),
                        "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor }
                    }
                }
            }
        })
    }

    struct Harness {
        server: MockServer,
        output: Utf8PathBuf,
        _dir: tempfile::TempDir,
    }

    impl Harness {
        fn new() -> Harness {
            let dir = tempfile::tempdir().unwrap();
            let output = Utf8PathBuf::from_path_buf(dir.path().join("output")).unwrap();
            Harness {
                server: MockServer::start(),
                output,
                _dir: dir,
            }
        }

        fn context(&self) -> GitHubContext {
            let mut env_store = GateEnv::new();
            env_store.insert(GateEnvKey::GithubRepository, "octo-org/octo-repo");
            env_store.insert(GateEnvKey::GithubOutput, self.output.as_str());
            env_store.insert(GateEnvKey::TeamGateSubscriptionUrl, &self.server.base_url());
            GitHubContext::from_env(&env_store).unwrap()
        }

        fn client_config(&self) -> GitHubClientConfig {
            GitHubClientConfig::builder()
                .override_endpoint(self.server.url("/graphql"))
                .build()
                .unwrap()
        }

        fn written(&self) -> Option<String> {
            fs::read_to_string(&self.output).ok()
        }
    }

    #[tokio::test]
    async fn it_accumulates_every_page_before_matching() {
        let harness = Harness::new();
        let first = harness.server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("authorization", "bearer ghp_test")
                .json_body_includes(r#"{"variables": {"cursor": null}}"#);
            then.status(200).json_body(page(&["Design"], true, Some("c1")));
        });
        let second = harness.server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .json_body_includes(r#"{"variables": {"cursor": "c1"}}"#);
            then.status(200).json_body(page(&["Engineering"], false, None));
        });

        let outcome = check(&[])
            .run(&harness.context(), &harness.client_config())
            .await
            .unwrap();

        first.assert();
        second.assert();
        let Outcome::Completed(outputs) = outcome else {
            panic!("expected the run to complete, got {outcome:?}");
        };
        assert_eq!(outputs.teams(), ["Design".to_string(), "Engineering".to_string()]);
        assert_that!(outputs.is_team_member()).is_true();
        assert_that!(harness.written().unwrap()).contains(r#"["Design","Engineering"]"#);
    }

    #[tokio::test]
    async fn it_stops_without_outputs_when_the_subscription_is_refused() {
        let harness = Harness::new();
        let subscription = harness.server.mock(|when, then| {
            when.method(GET)
                .path("/v1/github/octo-org/octo-repo/actions/subscription");
            then.status(403);
        });
        let graphql = harness.server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(page(&["Engineering"], false, None));
        });

        let outcome = check(&["--validate-subscription"])
            .run(&harness.context(), &harness.client_config())
            .await
            .unwrap();

        subscription.assert();
        graphql.assert_calls(0);
        assert_eq!(outcome, Outcome::Terminated(ExitSignal::SubscriptionInvalid));
        assert_that!(harness.written()).is_none();
    }

    #[rstest]
    #[case::active(200)]
    #[case::server_error(500)]
    #[tokio::test]
    async fn it_continues_unless_the_subscription_is_refused(#[case] status: u16) {
        let harness = Harness::new();
        harness.server.mock(|when, then| {
            when.method(GET);
            then.status(status);
        });
        harness.server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(page(&["Ops"], false, None));
        });

        let outcome = check(&["--validate-subscription"])
            .run(&harness.context(), &harness.client_config())
            .await
            .unwrap();

        let Outcome::Completed(outputs) = outcome else {
            panic!("expected the run to complete, got {outcome:?}");
        };
        assert_that!(outputs.is_team_member()).is_false();
    }

    #[tokio::test]
    async fn it_skips_the_subscription_check_outside_a_repository() {
        let harness = Harness::new();
        let subscription = harness.server.mock(|when, then| {
            when.method(GET);
            then.status(403);
        });
        harness.server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(page(&[], false, None));
        });
        let mut env_store = GateEnv::new();
        env_store.insert(GateEnvKey::TeamGateSubscriptionUrl, &harness.server.base_url());
        let context = GitHubContext::from_env(&env_store).unwrap();

        let outcome = check(&["--validate-subscription"])
            .run(&context, &harness.client_config())
            .await
            .unwrap();

        subscription.assert_calls(0);
        assert_that!(matches!(outcome, Outcome::Completed(_))).is_true();
    }

    #[tokio::test]
    async fn it_fails_without_outputs_when_the_user_does_not_exist() {
        let harness = Harness::new();
        harness.server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(json!({
                "data": { "user": null, "organization": null },
                "errors": [{
                    "type": "NOT_FOUND",
                    "path": ["user"],
                    "message": "Could not resolve to a User with the login of 'octocat'."
                }]
            }));
        });

        let error = check(&[])
            .run(&harness.context(), &harness.client_config())
            .await
            .unwrap_err();

        assert_that!(error.message()).is_equal_to(
            "Request failed due to following response errors:\n - Could not resolve to a User with the login of 'octocat'."
                .to_string(),
        );
        assert_that!(harness.written()).is_none();
    }
}
