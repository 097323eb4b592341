pub mod cli;
pub mod command;
mod error;
mod options;
mod utils;

pub use error::{GateError, GateResult, Suggestion};

/// The name of the binary, as set in `Cargo.toml`
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
/// The version currently set in `Cargo.toml`
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
