/// Errors produced by the services in this crate
#[derive(thiserror::Error, Debug)]
pub enum HttpServiceError {
    /// Request could not be assembled
    #[error("HTTP Error: {:?}", .0)]
    Http(#[from] http::Error),
    /// No response arrived before the deadline
    #[error("Request timed out")]
    TimedOut,
    /// Response was not in the expected encoding
    #[error("Decode error: {:?}", .0)]
    Decode(Box<dyn std::error::Error + Send + Sync + 'static>),
    /// Reading or writing a body failed
    #[error("Body error: {:?}", .0)]
    Body(Box<dyn std::error::Error + Send + Sync + 'static>),
    /// Connection to the server could not be established
    #[error("Connect error: {:?}", .0)]
    Connect(Box<dyn std::error::Error + Send + Sync + 'static>),
    /// Anything else
    #[error("Unexpected HTTP error: {:?}", .0)]
    Unexpected(Box<dyn std::error::Error + Send + Sync + 'static>),
}
