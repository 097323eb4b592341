//! Helpers for moving between [`Body`] implementations and [`Bytes`]

use bytes::Bytes;
use http_body::Body;
use http_body_util::{BodyExt, Full};

/// Drains a [`Body`] into a single [`Bytes`] buffer
pub async fn body_to_bytes<B>(body: &mut B) -> Result<Bytes, B::Error>
where
    B: Body<Data = Bytes> + Unpin,
{
    BodyExt::collect(body).await.map(|buf| buf.to_bytes())
}

/// Body for requests that carry no payload, such as a plain `GET`
pub fn empty() -> Full<Bytes> {
    Full::new(Bytes::new())
}
