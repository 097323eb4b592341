mod check;
pub(crate) mod output;
mod outcome;

pub use check::Check;
pub use outcome::{ExitSignal, Outcome};
pub use output::{OutputSink, StepOutputs};
