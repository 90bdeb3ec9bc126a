//! Driven port for the movie-info upstream.
//!
//! Adapters own transport, status mapping and retry; the domain only sees
//! decoded [`MovieInfo`] records or a classified [`UpstreamError`].

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::domain::MovieInfo;

use super::UpstreamError;

/// Port for reading movie info from the upstream provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieInfoSource: Send + Sync {
    /// Fetch one movie info record.
    ///
    /// `Ok(None)` means the upstream answered successfully with no record.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<MovieInfo>, UpstreamError>;

    /// Open the upstream's live feed of movie info records.
    ///
    /// The stream ends when the upstream closes it, or after yielding one
    /// final error.
    fn stream_all(&self) -> BoxStream<'static, Result<MovieInfo, UpstreamError>>;
}

/// Fixture source serving a fixed in-memory catalogue.
#[derive(Debug, Clone, Default)]
pub struct FixtureMovieInfoSource {
    infos: Vec<MovieInfo>,
}

impl FixtureMovieInfoSource {
    /// Serve the given records.
    #[must_use]
    pub fn new(infos: Vec<MovieInfo>) -> Self {
        Self { infos }
    }
}

#[async_trait]
impl MovieInfoSource for FixtureMovieInfoSource {
    async fn fetch_by_id(&self, id: &str) -> Result<Option<MovieInfo>, UpstreamError> {
        Ok(self.infos.iter().find(|info| info.id == id).cloned())
    }

    fn stream_all(&self) -> BoxStream<'static, Result<MovieInfo, UpstreamError>> {
        stream::iter(self.infos.clone().into_iter().map(Ok)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::TryStreamExt;

    fn info(id: &str) -> MovieInfo {
        MovieInfo {
            id: id.to_owned(),
            title: format!("Title {id}"),
            year: 2005,
            cast: vec!["Christian Bale".to_owned()],
            release_date: None,
        }
    }

    #[tokio::test]
    async fn fixture_finds_known_ids_only() {
        let source = FixtureMovieInfoSource::new(vec![info("m1")]);

        let found = source.fetch_by_id("m1").await.expect("fixture lookup");
        let missing = source.fetch_by_id("m9").await.expect("fixture lookup");

        assert_eq!(found.map(|i| i.id), Some("m1".to_owned()));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn fixture_streams_every_record_then_ends() {
        let source = FixtureMovieInfoSource::new(vec![info("m1"), info("m2")]);

        let all: Vec<MovieInfo> = source.stream_all().try_collect().await.expect("stream");

        assert_eq!(all.len(), 2);
    }
}
