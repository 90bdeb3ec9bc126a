//! Newline-delimited JSON streaming responses.

use actix_web::HttpResponse;
use actix_web::web::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tracing::warn;

use crate::domain::Error;

/// Media type of every streamed endpoint.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

fn encode_line<T: Serialize>(item: &T) -> Result<Bytes, Error> {
    let mut line = serde_json::to_vec(item)
        .map_err(|err| Error::internal(format!("failed to encode stream item: {err}")))?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}

/// Stream a fallible feed as NDJSON.
///
/// A failure before the first item becomes an ordinary error response; a
/// later failure is logged and ends the body.
pub async fn fallible_ndjson<S, T>(items: S) -> Result<HttpResponse, Error>
where
    S: Stream<Item = Result<T, Error>> + Unpin + 'static,
    T: Serialize + 'static,
{
    let (first, rest) = items.into_future().await;
    let first = first.transpose()?;

    let body = stream::iter(first.map(Ok))
        .chain(rest)
        .map(|item| {
            item.and_then(|value| encode_line(&value)).inspect_err(|err| {
                warn!(error = %err, "stream aborted after response started");
            })
        });
    Ok(HttpResponse::Ok()
        .content_type(NDJSON_CONTENT_TYPE)
        .streaming(body))
}

/// Stream an infallible feed as NDJSON, sending headers immediately.
pub fn live_ndjson<S, T>(items: S) -> HttpResponse
where
    S: Stream<Item = T> + 'static,
    T: Serialize + 'static,
{
    let body = items.map(|item| encode_line(&item));
    HttpResponse::Ok()
        .content_type(NDJSON_CONTENT_TYPE)
        .streaming(body)
}
