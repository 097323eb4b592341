//! Shared [`tower`] plumbing for the team-gate service stack

use std::pin::Pin;

use futures::Future;

pub mod service;

/// Boxed, sendable future returned by the hand-written services in this workspace
pub type ResponseFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;
