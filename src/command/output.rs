use std::fs::OpenOptions;
use std::io::{self, Write};

use camino::Utf8PathBuf;
use gate_client::operations::membership::TeamMembership;
use timber::command::WorkflowCommand;
use uuid::Uuid;

use crate::utils::context::GitHubContext;
use crate::{GateError, GateResult};

/// StepOutputs holds the values team-gate hands to later steps.
/// Every value is JSON, so `teams` can be read back with `fromJSON`
/// and `isTeamMember` compares as a boolean.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepOutputs {
    teams: Vec<String>,
    is_team_member: bool,
}

impl From<TeamMembership> for StepOutputs {
    fn from(membership: TeamMembership) -> Self {
        StepOutputs {
            teams: membership.teams,
            is_team_member: membership.is_team_member,
        }
    }
}

impl StepOutputs {
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn is_team_member(&self) -> bool {
        self.is_team_member
    }

    /// `(name, value)` pairs in the order they are written
    pub fn entries(&self) -> GateResult<Vec<(&'static str, String)>> {
        Ok(vec![
            ("teams", serde_json::to_string(&self.teams)?),
            ("isTeamMember", serde_json::to_string(&self.is_team_member)?),
        ])
    }

    pub fn write(&self, sink: &OutputSink) -> GateResult<()> {
        for (name, value) in self.entries()? {
            sink.set(name, &value)?;
        }
        Ok(())
    }
}

/// Where step outputs go
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OutputSink {
    /// Appended to the file named by `GITHUB_OUTPUT`
    File(Utf8PathBuf),
    /// Printed as `::set-output` commands, for runners without an output file
    Stdout,
}

impl OutputSink {
    pub fn for_context(context: &GitHubContext) -> OutputSink {
        match context.output_file() {
            Some(path) => OutputSink::File(path.clone()),
            None => OutputSink::Stdout,
        }
    }

    /// The text recorded for one output
    pub fn render(&self, name: &str, value: &str) -> GateResult<String> {
        match self {
            OutputSink::File(_) => {
                let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                // the runner would end the value early at the delimiter
                if name.contains(&delimiter) || value.contains(&delimiter) {
                    return Err(GateError::new(anyhow::anyhow!(
                        "Unexpected input: output `{}` contains the delimiter {}",
                        name,
                        delimiter
                    )));
                }
                Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
            }
            OutputSink::Stdout => Ok(format!(
                "{}\n",
                WorkflowCommand::new("set-output")
                    .property("name", name)
                    .message(value)
            )),
        }
    }

    pub fn set(&self, name: &str, value: &str) -> GateResult<()> {
        let rendered = self.render(name, value)?;
        match self {
            OutputSink::File(path) => {
                tracing::debug!(%path, name, "appending step output");
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(rendered.as_bytes())?;
            }
            OutputSink::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
