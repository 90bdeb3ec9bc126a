//! Process-wide live feed of newly created reviews.
//!
//! One producer (review creation) and any number of subscribers. Publishing
//! never waits: the channel is bounded and a subscriber that falls behind
//! loses the oldest records instead of slowing the producer. A new
//! subscriber first sees the most recently published record (if any), then
//! everything published after it attached.

use std::sync::{Mutex, PoisonError};

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;

use super::Review;

/// Default number of records buffered per subscriber.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Live broadcast of created reviews.
///
/// # Examples
/// ```
/// use futures_util::StreamExt;
/// use movies_backend::domain::{Review, ReviewBroadcast};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let feed = ReviewBroadcast::new(8);
/// let mut live = feed.subscribe();
/// feed.publish(Review {
///     id: Some("r1".to_owned()),
///     movie_info_id: "m1".to_owned(),
///     comment: "Molto buono!".to_owned(),
///     rating: 9.0,
/// });
/// let first = live.next().await.expect("published record");
/// assert_eq!(first.id.as_deref(), Some("r1"));
/// # });
/// ```
pub struct ReviewBroadcast {
    sender: broadcast::Sender<Review>,
    latest: Mutex<Option<Review>>,
}

impl ReviewBroadcast {
    /// Create a feed buffering up to `capacity` records per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            latest: Mutex::new(None),
        }
    }

    /// Emit `review` to every attached subscriber without waiting.
    pub fn publish(&self, review: Review) {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *latest = Some(review.clone());
        // Holding `latest` keeps publish and subscribe ordered: a subscriber
        // either replays this record or receives it live, never both.
        if self.sender.send(review).is_err() {
            debug!("review published with no live subscribers");
        }
    }

    /// Attach a subscriber. Detaching is dropping the returned stream.
    #[must_use]
    pub fn subscribe(&self) -> BoxStream<'static, Review> {
        let (replay, receiver) = {
            let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            (latest.clone(), self.sender.subscribe())
        };

        let live = stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(review) => return Some((review, receiver)),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "review subscriber lagged; oldest records dropped");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });

        stream::iter(replay).chain(live).boxed()
    }

    /// Number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ReviewBroadcast {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}
