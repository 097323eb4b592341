#![warn(missing_docs)]

//! Provides [`tower`] implementations for the HTTP requests team-gate makes

use std::time::Duration;

/// Install ring as the default rustls crypto provider. This runs automatically
/// as a global constructor in every binary that links gate-http (directly or
/// transitively).
#[ctor::ctor]
fn install_ring_crypto_provider() {
    // .ok() because the provider may already be installed, and that's the only
    // case that causes this to error
    rustls::crypto::ring::default_provider()
        .install_default()
        .ok();
}

use buildstructor::Builder;
use bytes::Bytes;
use derive_getters::Getters;
pub use http_body::Body;
pub use http_body_util::{BodyExt, Empty, Full};
use tower::{timeout::error::Elapsed, util::BoxCloneService};

pub mod body;
mod error;
pub mod extend_headers;
mod reqwest;
pub mod timeout;

pub use error::HttpServiceError;
pub use reqwest::{ReqwestService, ReqwestServiceFactory};

/// Ease-of-use synonym for the request type this crate operates on
pub type HttpRequest = http::Request<Full<Bytes>>;
/// Ease-of-use synonym for the response type this crate operates on
pub type HttpResponse = http::Response<Bytes>;
/// Ease-of-use synonym for the [`tower::Service`] type this crate provides
pub type HttpService = BoxCloneService<HttpRequest, HttpResponse, HttpServiceError>;

/// Default timeout applied to every request unless [`HttpServiceConfig`] says otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Object that creates an [`HttpService`] on-demand
///
/// This produces a [`tower::Service`] as a raw artifact, rather than a client, so callers
/// can stack their own layers on top of it.
pub trait HttpServiceFactory {
    /// Produces an [`HttpService`]
    #[allow(clippy::result_large_err)]
    fn create(&self) -> Result<HttpService, HttpServiceError>;
}

/// Configuration object for constructing an [`HttpService`].
/// This is intended to be agnostic to the underlying implementation
#[derive(Clone, Debug, Builder, Default, Getters)]
pub struct HttpServiceConfig {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl From<Box<dyn std::error::Error + Send + Sync>> for HttpServiceError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<Elapsed>() {
            Ok(_) => HttpServiceError::TimedOut,
            Err(err) => match err.downcast::<HttpServiceError>() {
                Ok(err) => *err,
                Err(err) => match err.downcast::<::reqwest::Error>() {
                    Ok(err) => HttpServiceError::from(*err),
                    Err(err) => HttpServiceError::Unexpected(err),
                },
            },
        }
    }
}
