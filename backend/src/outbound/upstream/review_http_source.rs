//! Reqwest-backed reviews source.

use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use tracing::debug;

use super::UpstreamHttp;
use super::status::{map_status_error, map_transport_error};
use crate::domain::Review;
use crate::domain::ports::{ReviewSource, Upstream, UpstreamError};

const UPSTREAM: Upstream = Upstream::Reviews;

/// Reviews adapter reading `{base}?movieInfoId={id}`.
#[derive(Clone)]
pub struct ReviewHttpSource {
    http: UpstreamHttp,
}

impl ReviewHttpSource {
    /// Wrap shared upstream plumbing.
    #[must_use]
    pub fn new(http: UpstreamHttp) -> Self {
        Self { http }
    }

    fn url_for(&self, movie_info_id: &str) -> Url {
        let mut url = self.http.endpoint(&[]);
        url.query_pairs_mut().append_pair("movieInfoId", movie_info_id);
        url
    }
}

async fn fetch_once(
    http: &UpstreamHttp,
    url: &Url,
    movie_info_id: &str,
) -> Result<Vec<Review>, UpstreamError> {
    let response = http
        .client()
        .get(url.clone())
        .header(ACCEPT, "application/json")
        .timeout(http.timeout())
        .send()
        .await
        .map_err(|error| map_transport_error(UPSTREAM, &error))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        debug!(movie_info_id, "reviews upstream has no reviews for movie");
        return Ok(Vec::new());
    }
    if !status.is_success() {
        return Err(map_status_error(
            UPSTREAM,
            status,
            &format!("Unable to find reviews for movie info id [{movie_info_id}]"),
        ));
    }

    let body = response
        .bytes()
        .await
        .map_err(|error| map_transport_error(UPSTREAM, &error))?;
    parse_reviews(&body)
}

/// Decode a JSON array body; an empty body is no reviews.
fn parse_reviews(body: &[u8]) -> Result<Vec<Review>, UpstreamError> {
    let trimmed = body.trim_ascii();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_slice(trimmed)
        .map_err(|error| UpstreamError::decode(UPSTREAM, error.to_string()))
}

impl ReviewSource for ReviewHttpSource {
    fn fetch_by_movie_info_id(
        &self,
        movie_info_id: &str,
    ) -> BoxStream<'static, Result<Review, UpstreamError>> {
        let http = self.http.clone();
        let url = self.url_for(movie_info_id);
        let movie_info_id = movie_info_id.to_owned();

        stream::once(async move {
            let reviews = http
                .retrier()
                .call(|| fetch_once(&http, &url, &movie_info_id))
                .await?;
            Ok::<_, UpstreamError>(stream::iter(reviews.into_iter().map(Ok)))
        })
        .try_flatten()
        .boxed()
    }
}
