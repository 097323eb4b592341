use std::pin::Pin;

use buildstructor::buildstructor;
use futures::Future;
use http_body_util::BodyExt;
use reqwest::ClientBuilder;
use tower::{util::BoxCloneService, Service, ServiceBuilder, ServiceExt};

use crate::{
    HttpRequest, HttpResponse, HttpService, HttpServiceConfig, HttpServiceError,
    HttpServiceFactory, DEFAULT_TIMEOUT,
};

/// Constructs [`HttpService`]s that share one [`reqwest::Client`]
#[derive(Clone, Debug)]
pub struct ReqwestServiceFactory {
    config: HttpServiceConfig,
    client: reqwest::Client,
}

#[buildstructor]
impl ReqwestServiceFactory {
    /// Constructs a new [`ReqwestServiceFactory`]
    #[builder]
    pub fn new(
        config: Option<HttpServiceConfig>,
        client: Option<reqwest::Client>,
    ) -> Result<ReqwestServiceFactory, HttpServiceError> {
        let config = config.unwrap_or_default();
        let client = match client {
            Some(client) => client,
            None => client_for(&config)?,
        };
        Ok(ReqwestServiceFactory { config, client })
    }
}

impl HttpServiceFactory for ReqwestServiceFactory {
    /// Creates a new [`HttpService`]
    fn create(&self) -> Result<HttpService, HttpServiceError> {
        let service = ReqwestService::builder()
            .config(self.config.clone())
            .client(self.client.clone())
            .build()?;
        Ok(service.boxed_clone())
    }
}

fn client_for(config: &HttpServiceConfig) -> Result<reqwest::Client, reqwest::Error> {
    let builder = ClientBuilder::new();
    let builder = match config.user_agent() {
        Some(user_agent) => builder.user_agent(user_agent.as_str()),
        None => builder,
    };
    builder.build()
}

/// A [`Service`] that wraps a [`reqwest`] client and uses [`http`] constructs for requests and responses
#[derive(Clone, Debug)]
pub struct ReqwestService {
    client: BoxCloneService<reqwest::Request, reqwest::Response, HttpServiceError>,
}

#[buildstructor]
impl ReqwestService {
    /// Constructs a new [`ReqwestService`]
    #[builder]
    pub fn new(
        config: Option<HttpServiceConfig>,
        client: Option<reqwest::Client>,
    ) -> Result<ReqwestService, HttpServiceError> {
        let config = config.unwrap_or_default();
        let client = match client {
            Some(client) => client,
            None => client_for(&config)?,
        };
        let timeout = config.timeout().unwrap_or(DEFAULT_TIMEOUT);
        tracing::trace!(?timeout, "building reqwest service");
        let client = ServiceBuilder::new()
            .map_err(HttpServiceError::from)
            .timeout(timeout)
            .service(client)
            .boxed_clone();
        Ok(ReqwestService { client })
    }
}

impl From<reqwest::Error> for HttpServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_body() {
            HttpServiceError::Body(value.into())
        } else if value.is_connect() {
            HttpServiceError::Connect(value.into())
        } else if value.is_timeout() {
            HttpServiceError::TimedOut
        } else if value.is_decode() {
            HttpServiceError::Decode(value.into())
        } else {
            HttpServiceError::Unexpected(value.into())
        }
    }
}

impl Service<HttpRequest> for ReqwestService {
    type Response = HttpResponse;
    type Error = HttpServiceError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.client.poll_ready(cx)
    }

    fn call(&mut self, req: HttpRequest) -> Self::Future {
        // https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
        let mut client = gate_tower::service::replace_ready_service(&mut self.client);
        let fut = async move {
            let (parts, body) = req.into_parts();
            let bytes = body
                .collect()
                .await
                .map_err(|err| HttpServiceError::Body(Box::new(err)))?
                .to_bytes();
            let req = http::Request::from_parts(parts, reqwest::Body::from(bytes));
            let req = reqwest::Request::try_from(req)?;
            tracing::debug!(method = %req.method(), url = %req.url(), "sending request");
            let resp = http::Response::from(client.call(req).await?);
            let (parts, body) = resp.into_parts();
            let bytes = body.collect().await?.to_bytes();
            tracing::debug!(status = %parts.status, "received response");
            Ok(http::Response::from_parts(parts, bytes))
        };
        Box::pin(fut)
    }
}

impl From<ReqwestService> for HttpService {
    fn from(value: ReqwestService) -> Self {
        value.boxed_clone()
    }
}
