#![warn(missing_docs)]

//! Provides GraphQL Middleware for HTTP Services

use std::{fmt, future::Future, pin::Pin, str::FromStr};

use bytes::Bytes;
use gate_http::{HttpRequest, HttpResponse};
use graphql_client::GraphQLQuery;
use http::{uri::InvalidUri, HeaderValue, Method, StatusCode, Uri};
use http_body_util::Full;
use tower::{Layer, Service};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Renders GraphQL errors the way they are reported to whoever ran the step,
/// one line per error under a common heading
pub fn describe_errors(errors: &[graphql_client::Error]) -> String {
    if errors.is_empty() {
        return "No data field provided".to_string();
    }
    let details: Vec<String> = errors
        .iter()
        .map(|err| format!(" - {}", err.message))
        .collect();
    format!(
        "Request failed due to following response errors:\n{}",
        details.join("\n")
    )
}

#[derive(serde::Deserialize)]
struct RestErrorBody {
    message: String,
}

/// Renders a failing status, preferring the `message` GitHub puts in the body
fn describe_status(status_code: &StatusCode, data: &Bytes) -> String {
    match serde_json::from_slice::<RestErrorBody>(data) {
        Ok(body) if !body.message.trim().is_empty() => body.message,
        _ => format!("GraphQL endpoint responded with status {status_code}"),
    }
}

/// Re-export / renamed type alias for [`graphql_client::Response`]
pub type GraphQLResponse<T> = graphql_client::Response<T>;

/// Errors that may occur from using a [`GraphQLService`]
#[derive(thiserror::Error, Debug)]
pub enum GraphQLServiceError<T: Send + Sync + fmt::Debug> {
    /// There was no data field provided in the response
    #[error("{}", describe_errors(.0))]
    NoData(Vec<graphql_client::Error>),
    /// The response returned some data, but there were errors
    #[error("{}", describe_errors(.errors))]
    PartialError {
        /// The partial data returned
        data: T,
        /// The GraphQL errors that were produced
        errors: Vec<graphql_client::Error>,
    },
    /// The endpoint rejected the credentials sent with the request
    #[error("Bad credentials. Check that the token is valid and has the read:org scope.")]
    InvalidCredentials,
    /// The endpoint answered with a failing status and no GraphQL errors to explain it
    #[error("{}", describe_status(.status_code, .data))]
    BadStatusCode {
        /// The [`StatusCode`] of the response
        status_code: StatusCode,
        /// The raw response body
        data: Bytes,
    },
    /// Data serialization error
    #[error("Serialization error")]
    Serialization(serde_json::Error),
    /// Data deserialization error
    #[error("Could not decode the GraphQL response: {error}")]
    Deserialization {
        /// The source error
        error: serde_json::Error,
        /// The data that was attempted to be deserialized
        data: Bytes,
        /// The [`StatusCode`] of the request
        status_code: StatusCode,
    },
    /// [`http`]-related error, probably from header-related tasks
    #[error("HTTP error: {:?}", .0)]
    Http(#[from] http::Error),
    /// Error that occurs from a failure to parse a [`Uri`] from a [`Url`]
    #[error("Unable to convert URL to URI.")]
    InvalidUri(#[from] InvalidUri),
    /// Errors that occur as a result of the underlying HTTP service failing
    #[error("Upstream service error: {}", .0)]
    UpstreamService(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Wrapper around [`GraphQLQuery::Variables`]
/// This type requires something more concrete around it to be used appropriately
pub struct GraphQLRequest<Q: GraphQLQuery> {
    variables: Q::Variables,
}

impl<Q> fmt::Debug for GraphQLRequest<Q>
where
    Q: GraphQLQuery,
    Q::Variables: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{:?}", self.variables)
    }
}

impl<Q> PartialEq for GraphQLRequest<Q>
where
    Q: GraphQLQuery,
    Q::Variables: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables
    }
}

impl<Q: GraphQLQuery> GraphQLRequest<Q> {
    /// Constructs a new [`GraphQLRequest`]
    pub fn new(variables: Q::Variables) -> GraphQLRequest<Q> {
        GraphQLRequest { variables }
    }
    /// Consumes the [`GraphQLRequest`] and produces the inner [`GraphQLQuery::Variables`] object
    pub fn into_inner(self) -> Q::Variables {
        self.variables
    }
}

/// [`Layer`] that wraps a service with GraphQL middleware
#[derive(Clone, Debug, Default)]
pub struct GraphQLLayer {
    endpoint: Option<Url>,
}

impl GraphQLLayer {
    /// Constructs a new [`GraphQLLayer`]
    pub fn new(endpoint: Url) -> GraphQLLayer {
        GraphQLLayer {
            endpoint: Some(endpoint),
        }
    }
}

impl<S> Layer<S> for GraphQLLayer {
    type Service = GraphQLService<S>;
    fn layer(&self, inner: S) -> Self::Service {
        GraphQLService::new(self.endpoint.clone(), inner)
    }
}

/// Middleware that wraps a service in GraphQL functionality
#[derive(Clone, Debug)]
pub struct GraphQLService<S> {
    inner: S,
    endpoint: Option<Url>,
}

impl<S> GraphQLService<S> {
    /// Constructs a new [`GraphQLService`]
    pub fn new(endpoint: Option<Url>, inner: S) -> GraphQLService<S> {
        GraphQLService { endpoint, inner }
    }
}

fn interpret_response<T>(resp: HttpResponse) -> Result<T, GraphQLServiceError<T>>
where
    T: serde::de::DeserializeOwned + Send + Sync + fmt::Debug,
{
    let status_code = resp.status();
    if status_code == StatusCode::UNAUTHORIZED {
        return Err(GraphQLServiceError::InvalidCredentials);
    }
    let body = resp.into_body();
    let graphql_response: GraphQLResponse<T> =
        serde_json::from_slice(&body).map_err(|error| GraphQLServiceError::Deserialization {
            error,
            data: body.clone(),
            status_code,
        })?;

    match (graphql_response.data, graphql_response.errors) {
        (Some(data), Some(errors)) if !errors.is_empty() => {
            tracing::debug!(?errors, "GraphQL response carried errors alongside data");
            Err(GraphQLServiceError::PartialError { data, errors })
        }
        (None, Some(errors)) if !errors.is_empty() => Err(GraphQLServiceError::NoData(errors)),
        _ if !status_code.is_success() => Err(GraphQLServiceError::BadStatusCode {
            status_code,
            data: body,
        }),
        (Some(data), _) => Ok(data),
        (None, _) => Err(GraphQLServiceError::NoData(Vec::default())),
    }
}

impl<Q, S> Service<GraphQLRequest<Q>> for GraphQLService<S>
where
    Q: GraphQLQuery + Send + Sync + 'static,
    Q::Variables: Send,
    Q::ResponseData: Send + Sync + fmt::Debug,
    S: Service<HttpRequest, Response = HttpResponse> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    type Response = Q::ResponseData;
    type Error = GraphQLServiceError<Q::ResponseData>;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        tower::Service::poll_ready(&mut self.inner, cx)
            .map_err(|err| GraphQLServiceError::UpstreamService(Box::new(err)))
    }

    fn call(&mut self, req: GraphQLRequest<Q>) -> Self::Future {
        // https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
        let mut client = gate_tower::service::replace_ready_service(&mut self.inner);

        let url = self.endpoint.clone();

        let fut = async move {
            let body = Q::build_query(req.into_inner());
            tracing::trace!(operation = body.operation_name, "sending GraphQL operation");
            let body_bytes =
                Bytes::from(serde_json::to_vec(&body).map_err(GraphQLServiceError::Serialization)?);
            let req = http::Request::builder();
            let req = if let Some(url) = url.as_ref() {
                req.uri(Uri::from_str(url.as_ref())?)
            } else {
                req
            };
            let req = req
                .method(Method::POST)
                .header(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static(JSON_CONTENT_TYPE),
                )
                .body(Full::new(body_bytes))
                .map_err(GraphQLServiceError::Http)?;
            let resp = client
                .call(req)
                .await
                .map_err(|err| GraphQLServiceError::UpstreamService(Box::new(err)))?;
            interpret_response::<Q::ResponseData>(resp)
        };
        Box::pin(fut)
    }
}
