//! Service settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MOVIES_*`/`REVIEWS_*` environment variables,
//! or configuration files. Optional fields fall back to defaults through the
//! accessors below; upstream URLs have no default and must be supplied.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{DEFAULT_BROADCAST_CAPACITY, RetryPolicy};

const MOVIES_DEFAULT_BIND_ADDR: &str = "0.0.0.0:8082";
const REVIEWS_DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Errors raised while validating loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A required value was not supplied by any source.
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },
    /// An upstream URL did not parse.
    #[error("invalid URL for {name}='{value}': {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The listen address did not parse.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

fn parse_bind_addr(raw: Option<&str>, default: &str) -> Result<SocketAddr, SettingsError> {
    let value = raw.unwrap_or(default);
    value
        .parse()
        .map_err(|source| SettingsError::InvalidBindAddr {
            value: value.to_owned(),
            source,
        })
}

fn parse_url(name: &'static str, raw: Option<&str>) -> Result<Url, SettingsError> {
    let value = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { name })?;
    Url::parse(value).map_err(|source| SettingsError::InvalidUrl {
        name,
        value: value.to_owned(),
        source,
    })
}

/// Settings for the movie aggregation service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MOVIES")]
pub struct MoviesSettings {
    /// Base URL of the movie-info provider.
    pub movie_info_url: Option<String>,
    /// Base URL of the reviews provider.
    pub reviews_url: Option<String>,
    /// Listen address.
    pub bind_addr: Option<String>,
    /// Per-request timeout for single-shot upstream calls.
    pub request_timeout_ms: Option<u64>,
    /// Retries after the first failed attempt; a value of 3 allows four
    /// attempts in total.
    pub retry_max_retries: Option<u32>,
    /// Fixed wait before each retry.
    pub retry_delay_ms: Option<u64>,
}

impl MoviesSettings {
    /// Validated movie-info base URL.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] when unset, [`SettingsError::InvalidUrl`]
    /// when it does not parse.
    pub fn movie_info_url(&self) -> Result<Url, SettingsError> {
        parse_url("movie_info_url", self.movie_info_url.as_deref())
    }

    /// Validated reviews base URL.
    ///
    /// # Errors
    ///
    /// As for [`Self::movie_info_url`].
    pub fn reviews_url(&self) -> Result<Url, SettingsError> {
        parse_url("reviews_url", self.reviews_url.as_deref())
    }

    /// Listen address, `0.0.0.0:8082` by default.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref(), MOVIES_DEFAULT_BIND_ADDR)
    }

    /// Per-request timeout for single-shot upstream calls.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    /// Retry policy shared by both upstream clients.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        let max_retries = self
            .retry_max_retries
            .unwrap_or(RetryPolicy::DEFAULT_MAX_RETRIES);
        let delay = self
            .retry_delay_ms
            .map_or(RetryPolicy::DEFAULT_DELAY, Duration::from_millis);
        RetryPolicy::new(max_retries, delay)
    }
}

/// Settings for the review store service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REVIEWS")]
pub struct ReviewsSettings {
    /// Listen address.
    pub bind_addr: Option<String>,
    /// Records buffered per live-feed subscriber.
    pub broadcast_capacity: Option<usize>,
}

impl ReviewsSettings {
    /// Listen address, `0.0.0.0:8081` by default.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref(), REVIEWS_DEFAULT_BIND_ADDR)
    }

    /// Live-feed buffer size.
    #[must_use]
    pub fn broadcast_capacity(&self) -> usize {
        self.broadcast_capacity
            .unwrap_or(DEFAULT_BROADCAST_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use crate::domain::ErrorClassification;

    const MOVIES_VARS: [&str; 6] = [
        "MOVIES_MOVIE_INFO_URL",
        "MOVIES_REVIEWS_URL",
        "MOVIES_BIND_ADDR",
        "MOVIES_REQUEST_TIMEOUT_MS",
        "MOVIES_RETRY_MAX_RETRIES",
        "MOVIES_RETRY_DELAY_MS",
    ];

    fn movies_env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        MOVIES_VARS
            .iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load_movies() -> MoviesSettings {
        MoviesSettings::load_from_iter([OsString::from("movies-service")])
            .expect("config should load")
    }

    #[rstest]
    fn movies_defaults_apply_when_unset() {
        let _guard = lock_env(movies_env(&[]));

        let settings = load_movies();
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8082".parse().expect("addr")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.retry_policy(), RetryPolicy::default());
    }

    #[rstest]
    fn missing_upstream_url_is_reported_by_name() {
        let _guard = lock_env(movies_env(&[]));

        let error = load_movies().movie_info_url().expect_err("url is required");
        assert_eq!(error.to_string(), "missing required setting: movie_info_url");
    }

    #[rstest]
    fn movies_environment_overrides_are_respected() {
        let _guard = lock_env(movies_env(&[
            ("MOVIES_MOVIE_INFO_URL", "http://info.local:8080/v1/movie_infos"),
            ("MOVIES_REVIEWS_URL", "http://reviews.local:8081/v1/reviews"),
            ("MOVIES_BIND_ADDR", "127.0.0.1:9000"),
            ("MOVIES_RETRY_MAX_RETRIES", "5"),
            ("MOVIES_RETRY_DELAY_MS", "250"),
        ]));

        let settings = load_movies();
        assert_eq!(
            settings.movie_info_url().expect("info url").path(),
            "/v1/movie_infos"
        );
        assert_eq!(
            settings.reviews_url().expect("reviews url").host_str(),
            Some("reviews.local")
        );
        assert_eq!(settings.bind_addr().expect("addr").port(), 9000);
        assert_eq!(
            settings.retry_policy(),
            RetryPolicy::new(5, Duration::from_millis(250))
        );
    }

    #[rstest]
    fn retry_setting_counts_retries_not_attempts() {
        let _guard = lock_env(movies_env(&[("MOVIES_RETRY_MAX_RETRIES", "2")]));

        let policy = load_movies().retry_policy();
        assert_eq!(policy.max_retries(), 2);
        assert!(policy.should_retry(ErrorClassification::ServerError, 1));
        assert!(!policy.should_retry(ErrorClassification::ServerError, 2));
    }

    #[rstest]
    #[case::not_a_url("movie_info_url", Some("not a url"))]
    #[case::blank("movie_info_url", Some("   "))]
    fn unusable_urls_are_rejected(#[case] name: &'static str, #[case] raw: Option<&str>) {
        assert!(parse_url(name, raw).is_err());
    }

    #[rstest]
    fn bad_bind_addr_is_rejected() {
        let error = parse_bind_addr(Some("localhost"), MOVIES_DEFAULT_BIND_ADDR)
            .expect_err("not a socket address");
        assert!(matches!(error, SettingsError::InvalidBindAddr { .. }));
    }

    #[rstest]
    fn reviews_defaults_apply_when_unset() {
        let _guard = lock_env([
            ("REVIEWS_BIND_ADDR", None::<String>),
            ("REVIEWS_BROADCAST_CAPACITY", None::<String>),
        ]);

        let settings = ReviewsSettings::load_from_iter([OsString::from("reviews-service")])
            .expect("config should load");
        assert_eq!(settings.bind_addr().expect("addr").port(), 8081);
        assert_eq!(settings.broadcast_capacity(), DEFAULT_BROADCAST_CAPACITY);
    }
}
