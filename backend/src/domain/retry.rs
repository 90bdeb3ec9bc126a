//! Bounded fixed-delay retry shared by every upstream client.
//!
//! Failures expose an [`ErrorClassification`] tag and the policy only ever
//! looks at that tag, so "what failed" stays with the adapter and "how to
//! retry" lives here once. Only [`ErrorClassification::ServerError`] is
//! retried; once retries are exhausted the last failure is handed back
//! untouched.
//!
//! Waits go through [`RetrySleeper`] so they are scheduled rather than
//! blocking, and so tests can observe them without waiting. Dropping the
//! future or stream returned by [`Retrier`] drops any pending wait with it.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tracing::{error, warn};

/// Retry-relevant category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClassification {
    /// The request itself was rejected (HTTP 4xx); repeating it cannot help.
    ClientError,
    /// The upstream failed (HTTP 5xx); the failure may be transient.
    ServerError,
    /// Transport, decode, or any other failure outside the status taxonomy.
    Unclassified,
}

/// Implemented by errors that can be inspected by [`RetryPolicy`].
pub trait Classify {
    /// Category used for the retry decision.
    fn classification(&self) -> ErrorClassification;

    /// Label of the dependency that failed, recorded on retry logs.
    fn origin(&self) -> Option<&'static str> {
        None
    }
}

/// Fixed-delay, bounded retry decision.
///
/// # Examples
/// ```
/// use movies_backend::domain::{ErrorClassification, RetryPolicy};
///
/// let policy = RetryPolicy::default();
/// assert!(policy.should_retry(ErrorClassification::ServerError, 2));
/// assert!(!policy.should_retry(ErrorClassification::ServerError, 3));
/// assert!(!policy.should_retry(ErrorClassification::ClientError, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Retries allowed after the initial attempt.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    /// Wait before each retry.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    /// Build a policy with explicit limits.
    #[must_use]
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Retries allowed after the initial attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Wait before each retry.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether another attempt should follow a failure of `classification`
    /// when `retries_made` retries have already been spent.
    #[must_use]
    pub fn should_retry(&self, classification: ErrorClassification, retries_made: u32) -> bool {
        classification == ErrorClassification::ServerError && retries_made < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_RETRIES, Self::DEFAULT_DELAY)
    }
}

/// Non-blocking wait used between attempts.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio timer-backed sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Applies a [`RetryPolicy`] to single calls and to restartable streams.
#[derive(Clone)]
pub struct Retrier {
    policy: RetryPolicy,
    sleeper: Arc<dyn RetrySleeper>,
}

impl Retrier {
    /// Retrier sleeping on the Tokio timer.
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, Arc::new(TokioSleeper))
    }

    /// Retrier with an injected sleeper.
    #[must_use]
    pub fn with_sleeper(policy: RetryPolicy, sleeper: Arc<dyn RetrySleeper>) -> Self {
        Self { policy, sleeper }
    }

    /// Policy applied by this retrier.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the retry budget is spent.
    ///
    /// # Examples
    /// ```
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::time::Duration;
    ///
    /// use movies_backend::domain::{Classify, ErrorClassification, Retrier, RetryPolicy};
    ///
    /// #[derive(Debug)]
    /// struct Flaky;
    /// impl std::fmt::Display for Flaky {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         f.write_str("flaky")
    ///     }
    /// }
    /// impl Classify for Flaky {
    ///     fn classification(&self) -> ErrorClassification {
    ///         ErrorClassification::ServerError
    ///     }
    /// }
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let calls = AtomicU32::new(0);
    /// let retrier = Retrier::new(RetryPolicy::new(3, Duration::ZERO));
    /// let value = retrier
    ///     .call(|| async {
    ///         if calls.fetch_add(1, Ordering::SeqCst) < 2 { Err(Flaky) } else { Ok(7) }
    ///     })
    ///     .await;
    /// assert_eq!(value.ok(), Some(7));
    /// assert_eq!(calls.load(Ordering::SeqCst), 3);
    /// # });
    /// ```
    pub async fn call<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + Display,
    {
        let mut retries_made = 0_u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(failure) => {
                    let classification = failure.classification();
                    if !self.policy.should_retry(classification, retries_made) {
                        log_give_up(&failure, classification, retries_made);
                        return Err(failure);
                    }
                    retries_made += 1;
                    log_retry(&failure, retries_made, self.policy.delay);
                    self.sleeper.sleep(self.policy.delay).await;
                }
            }
        }
    }

    /// Wrap a restartable stream.
    ///
    /// A retryable error at any point abandons the current stream and opens a
    /// fresh one from `open`; items already yielded stay yielded. The retry
    /// budget is shared across the whole call, not reset per item. A final
    /// error is yielded once and ends the stream.
    pub fn stream<T, E, F>(&self, open: F) -> BoxStream<'static, Result<T, E>>
    where
        F: Fn() -> BoxStream<'static, Result<T, E>> + Send + Sync + 'static,
        T: Send + 'static,
        E: Classify + Display + Send + 'static,
    {
        let state = RestartState {
            current: open(),
            open,
            policy: self.policy,
            sleeper: Arc::clone(&self.sleeper),
            retries_made: 0,
            finished: false,
        };

        stream::unfold(state, |mut state| async move {
            if state.finished {
                return None;
            }
            loop {
                match state.current.next().await {
                    Some(Ok(item)) => return Some((Ok(item), state)),
                    Some(Err(failure)) => {
                        let classification = failure.classification();
                        if !state.policy.should_retry(classification, state.retries_made) {
                            log_give_up(&failure, classification, state.retries_made);
                            state.finished = true;
                            return Some((Err(failure), state));
                        }
                        state.retries_made += 1;
                        log_retry(&failure, state.retries_made, state.policy.delay);
                        state.sleeper.sleep(state.policy.delay).await;
                        state.current = (state.open)();
                    }
                    None => return None,
                }
            }
        })
        .boxed()
    }
}

struct RestartState<T, E, F> {
    current: BoxStream<'static, Result<T, E>>,
    open: F,
    policy: RetryPolicy,
    sleeper: Arc<dyn RetrySleeper>,
    retries_made: u32,
    finished: bool,
}

fn log_retry(failure: &(impl Classify + Display), retry: u32, delay: Duration) {
    warn!(
        upstream = failure.origin().unwrap_or("unknown"),
        error = %failure,
        retry,
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "retrying after server error"
    );
}

fn log_give_up(
    failure: &(impl Classify + Display),
    classification: ErrorClassification,
    retries_made: u32,
) {
    if classification == ErrorClassification::ServerError {
        error!(
            upstream = failure.origin().unwrap_or("unknown"),
            error = %failure,
            retries_made,
            "retries exhausted"
        );
    }
}
