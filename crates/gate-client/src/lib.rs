//! GitHub API operations for the team-gate CLI.

mod error;

/// Module for client related errors.
pub use error::GateClientError;

/// Operations team-gate runs against GitHub and the subscription service
pub mod operations;
