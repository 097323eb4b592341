mod metadata;

pub use metadata::{Metadata, Suggestion};

pub type GateResult<T> = std::result::Result<T, GateError>;

use std::borrow::BorrowMut;
use std::fmt::{self, Debug, Display};

/// A specialized `Error` type for team-gate that wraps `anyhow`
/// and provides some extra `Metadata` for end users depending
/// on the specific error they encountered.
#[derive(Debug)]
pub struct GateError {
    error: anyhow::Error,
    metadata: Metadata,
}

impl GateError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let mut error = error.into();
        let metadata = Metadata::from(error.borrow_mut());

        Self { error, metadata }
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.metadata.suggestion.as_ref()
    }

    /// The message the step is failed with
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl Display for GateError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "error: {}", &self.error)?;
        if let Some(suggestion) = &self.metadata.suggestion {
            writeln!(formatter, "        {}", suggestion)?;
        }
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> From<E> for GateError {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}
