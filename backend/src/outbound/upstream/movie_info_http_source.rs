//! Reqwest-backed movie-info source.

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::debug;

use super::UpstreamHttp;
use super::ndjson::decode_ndjson;
use super::status::{map_status_error, map_transport_error};
use crate::domain::MovieInfo;
use crate::domain::ports::{MovieInfoSource, Upstream, UpstreamError};

const UPSTREAM: Upstream = Upstream::MovieInfo;
const STREAM_FAILURE: &str = "Unable to find any movie info.";
const NDJSON: &str = "application/x-ndjson";

/// Movie-info adapter reading `{base}/{id}` and the `{base}/stream` feed.
#[derive(Clone)]
pub struct MovieInfoHttpSource {
    http: UpstreamHttp,
}

impl MovieInfoHttpSource {
    /// Wrap shared upstream plumbing.
    #[must_use]
    pub fn new(http: UpstreamHttp) -> Self {
        Self { http }
    }

    async fn fetch_once(&self, url: &Url, id: &str) -> Result<Option<MovieInfo>, UpstreamError> {
        let response = self
            .http
            .client()
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .timeout(self.http.timeout())
            .send()
            .await
            .map_err(|error| map_transport_error(UPSTREAM, &error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(
                UPSTREAM,
                status,
                &format!("Unable to find info with id [{id}]"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(UPSTREAM, &error))?;
        parse_info(&body)
    }
}

/// An empty or `null` body is a successful "no such record".
fn parse_info(body: &[u8]) -> Result<Option<MovieInfo>, UpstreamError> {
    let trimmed = body.trim_ascii();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice::<Option<MovieInfo>>(trimmed)
        .map_err(|error| UpstreamError::decode(UPSTREAM, error.to_string()))
}

fn open_stream(client: Client, url: Url) -> BoxStream<'static, Result<MovieInfo, UpstreamError>> {
    stream::once(async move {
        let response = client
            .get(url)
            .header(ACCEPT, NDJSON)
            .send()
            .await
            .map_err(|error| map_transport_error(UPSTREAM, &error))?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(UPSTREAM, status, STREAM_FAILURE));
        }
        debug!(upstream = %UPSTREAM, "movie info stream opened");
        Ok(decode_ndjson::<MovieInfo, _, _, _>(UPSTREAM, response.bytes_stream()))
    })
    .try_flatten()
    .boxed()
}

#[async_trait]
impl MovieInfoSource for MovieInfoHttpSource {
    async fn fetch_by_id(&self, id: &str) -> Result<Option<MovieInfo>, UpstreamError> {
        let url = self.http.endpoint(&[id]);
        self.http
            .retrier()
            .call(|| self.fetch_once(&url, id))
            .await
    }

    fn stream_all(&self) -> BoxStream<'static, Result<MovieInfo, UpstreamError>> {
        let client = self.http.client().clone();
        let url = self.http.endpoint(&["stream"]);
        self.http
            .retrier()
            .stream(move || open_stream(client.clone(), url.clone()))
    }
}
