use std::fmt;

use crate::command::StepOutputs;

/// How a run ended when it did not fail
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Membership was resolved and the outputs were written
    Completed(StepOutputs),
    /// The run stopped early on purpose; no outputs were written
    Terminated(ExitSignal),
}

/// A deliberate stop that is not reported as a step failure
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitSignal {
    /// The subscription service refused the repository
    SubscriptionInvalid,
}

impl ExitSignal {
    pub fn exit_code(&self) -> i32 {
        match self {
            ExitSignal::SubscriptionInvalid => 1,
        }
    }
}

impl fmt::Display for ExitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitSignal::SubscriptionInvalid => {
                f.write_str("Subscription is not valid. Reach out to support@stepsecurity.io")
            }
        }
    }
}
