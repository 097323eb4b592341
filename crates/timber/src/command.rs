//! Builder for GitHub Actions workflow commands (`::name key=value::message`)

use std::fmt;

/// One workflow command line, without the trailing newline
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WorkflowCommand {
    name: String,
    properties: Vec<(String, String)>,
    message: String,
}

impl WorkflowCommand {
    /// Starts a command called `name`, e.g. `error` or `set-output`
    pub fn new(name: impl Into<String>) -> WorkflowCommand {
        WorkflowCommand {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds a `key=value` property; properties keep insertion order
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> WorkflowCommand {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Sets the text after the final `::`
    pub fn message(mut self, message: impl Into<String>) -> WorkflowCommand {
        self.message = message.into();
        self
    }
}

impl fmt::Display for WorkflowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.name)?;
        for (index, (key, value)) in self.properties.iter().enumerate() {
            let separator = if index == 0 { " " } else { "," };
            write!(f, "{separator}{key}={}", escape_property(value))?;
        }
        write!(f, "::{}", escape_data(&self.message))
    }
}

/// Escapes a command message so it stays on one line
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a property value; on top of [`escape_data`], `:` and `,` delimit properties
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
