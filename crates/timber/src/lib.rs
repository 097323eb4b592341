#![deny(missing_docs)]

//! Defines the output format of traces, events, and spans produced
//! by `tracing`, rendered as GitHub Actions workflow commands so the
//! runner can annotate errors and warnings and fold debug output away.

use std::io;

pub use tracing_core::Level;

pub mod command;
mod formatter;

pub use formatter::WorkflowCommandFormat;

/// possible log levels
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Level used when none is requested
pub const DEFAULT_LEVEL: Level = Level::INFO;

/// Initializes a global tracing subscriber that formats
/// all logs produced by an application that calls init,
/// and all logs produced by libraries consumed by that application.
///
/// Workflow commands are only recognized on stdout, so that is where every event goes.
pub fn init(level: Option<Level>) {
    let level = level.unwrap_or(DEFAULT_LEVEL);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .event_format(WorkflowCommandFormat)
        .with_writer(io::stdout)
        .init();
}
