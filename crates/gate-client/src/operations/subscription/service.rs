use std::{future::Future, pin::Pin, str::FromStr, time::Duration};

use gate_http::{
    body,
    timeout::{Timeout, TimeoutLayer},
    HttpRequest, HttpResponse, HttpServiceError,
};
use http::{Method, StatusCode, Uri};
use tower::{Layer, Service};
use url::Url;

use crate::GateClientError;

use super::types::{SubscriptionCheckRequest, SubscriptionStatus};

/// Production base URL of the subscription service
pub const DEFAULT_SUBSCRIPTION_API_URL: &str = "https://agent.api.stepsecurity.io";
/// How long the subscription service gets to answer before the check is skipped
pub const SUBSCRIPTION_TIMEOUT: Duration = Duration::from_millis(3000);

/// Checks a repository's subscription with a single `GET`.
///
/// Only a `403` is treated as a verdict against the repository; every other
/// outcome, including the request timing out, resolves to
/// [`SubscriptionStatus::Unverified`] rather than an error.
#[derive(Clone, Debug)]
pub struct SubscriptionCheck<S> {
    inner: Timeout<S>,
    base_url: Url,
}

impl<S> SubscriptionCheck<S> {
    pub fn new(inner: S, base_url: Url) -> SubscriptionCheck<S> {
        SubscriptionCheck::with_timeout(inner, base_url, SUBSCRIPTION_TIMEOUT)
    }

    pub fn with_timeout(inner: S, base_url: Url, timeout: Duration) -> SubscriptionCheck<S> {
        SubscriptionCheck {
            inner: TimeoutLayer::new(timeout).layer(inner),
            base_url,
        }
    }

    fn endpoint(&self, repository: &str) -> String {
        format!(
            "{}/v1/github/{}/actions/subscription",
            self.base_url.as_str().trim_end_matches('/'),
            repository
        )
    }
}

fn request_for(endpoint: &str) -> Result<HttpRequest, HttpServiceError> {
    let uri = Uri::from_str(endpoint).map_err(|err| HttpServiceError::Http(err.into()))?;
    Ok(http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(body::empty())?)
}

fn status_from(result: Result<HttpResponse, HttpServiceError>) -> SubscriptionStatus {
    match result {
        Ok(resp) if resp.status() == StatusCode::FORBIDDEN => SubscriptionStatus::Inactive,
        Ok(resp) if resp.status().is_success() => SubscriptionStatus::Active,
        Ok(resp) => SubscriptionStatus::Unverified {
            reason: format!("subscription service responded with {}", resp.status()),
        },
        Err(err) => SubscriptionStatus::Unverified {
            reason: err.to_string(),
        },
    }
}

impl<S> Service<SubscriptionCheckRequest> for SubscriptionCheck<S>
where
    S: Service<HttpRequest, Response = HttpResponse, Error = HttpServiceError>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    type Response = SubscriptionStatus;
    type Error = GateClientError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner
            .poll_ready(cx)
            .map_err(|err| GateClientError::ServiceReady(Box::new(err)))
    }

    fn call(&mut self, req: SubscriptionCheckRequest) -> Self::Future {
        let endpoint = self.endpoint(&req.repository);
        let mut inner = gate_tower::service::replace_ready_service(&mut self.inner);
        let fut = async move {
            tracing::debug!(%endpoint, "checking subscription");
            let result = match request_for(&endpoint) {
                Ok(request) => inner.call(request).await,
                Err(err) => Err(err),
            };
            let status = status_from(result);
            tracing::debug!(%status);
            Ok(status)
        };
        Box::pin(fut)
    }
}
