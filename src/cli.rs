use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Parser;
use timber::{Level, LEVELS};

use crate::command::{self, Outcome};
use crate::utils::{client::GitHubClientConfig, context::GitHubContext, env::GateEnv};
use crate::GateResult;

#[derive(Debug, Parser)]
#[command(
    name = "team-gate",
    version,
    about = "Reports whether a GitHub user belongs to any of a set of organization teams",
    long_about = "
team-gate pages through the teams a user belongs to in a GitHub organization
and reports them as step outputs:

    teams         JSON array of every team name, in the order GitHub returned them
    isTeamMember  true when any of those teams is one of the --team values

Every option can also be supplied as the step input of the same name, which the
Actions runner exports as an INPUT_* environment variable.
"
)]
pub struct TeamGate {
    #[command(flatten)]
    check: command::Check,

    /// Specify team-gate's log level
    #[arg(
        long = "log",
        short = 'l',
        global = true,
        default_value = "info",
        ignore_case = true,
        value_parser = PossibleValuesParser::new(LEVELS).try_map(|level| level.parse::<Level>())
    )]
    log_level: Level,

    #[arg(skip)]
    env_store: GateEnv,
}

impl TeamGate {
    pub fn log_level(&self) -> Level {
        self.log_level
    }

    pub async fn run(&self) -> GateResult<Outcome> {
        let context = self.get_github_context()?;
        let client_config = self.get_client_config(&context)?;
        self.check.run(&context, &client_config).await
    }

    pub(crate) fn get_github_context(&self) -> GateResult<GitHubContext> {
        GitHubContext::from_env(&self.env_store)
    }

    pub(crate) fn get_client_config(&self, context: &GitHubContext) -> GateResult<GitHubClientConfig> {
        GitHubClientConfig::builder()
            .and_override_endpoint(context.graphql_url().clone())
            .build()
    }
}
