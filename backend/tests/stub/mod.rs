//! In-process upstream stub bound to an ephemeral port.
//!
//! Tests register the routes they need through a `ServiceConfig` closure and
//! count hits with shared atomics. The server runs on the test's runtime and
//! stops when that runtime shuts down.

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use movies_backend::domain::{Retrier, RetryPolicy};
use movies_backend::outbound::upstream::UpstreamHttp;
use reqwest::Url;

/// Root URL of a running stub.
pub struct Stub {
    root: Url,
}

impl Stub {
    /// Start a stub serving the routes registered by `configure`.
    pub fn serve<F>(configure: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let server = HttpServer::new(move || App::new().configure(configure.clone()))
            .workers(1)
            .listen(listener)
            .expect("stub listen")
            .run();
        actix_web::rt::spawn(server);
        Self {
            root: Url::parse(&format!("http://{addr}/")).expect("stub url"),
        }
    }

    /// Upstream client rooted at `path` on this stub, retrying without delay.
    pub fn client(&self, path: &str) -> UpstreamHttp {
        let base = self.root.join(path).expect("stub base url");
        UpstreamHttp::new(base, Duration::from_secs(5), instant_retrier())
            .expect("upstream client")
    }
}

/// Default retry budget with no wait between attempts.
pub fn instant_retrier() -> Retrier {
    Retrier::new(RetryPolicy::new(
        RetryPolicy::DEFAULT_MAX_RETRIES,
        Duration::ZERO,
    ))
}

/// Shared hit counter.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    /// Record a hit and return how many came before it.
    pub fn record(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    /// Hits so far.
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub const BATMAN: &str = r#"{"id":"m1","name":"Batman Begins","year":2005,"cast":["Christian Bale","Michael Cane"],"releaseDate":"2005-06-15"}"#;
pub const DARK_KNIGHT: &str = r#"{"id":"m2","name":"The Dark Knight","year":2008,"cast":["Christian Bale","Heath Ledger"],"releaseDate":"2008-07-18"}"#;
pub const BATMAN_REVIEWS: &str = r#"[{"id":"r1","movieInfoId":"m1","comment":"Awesome Movie","rating":9.0},{"id":"r2","movieInfoId":"m1","comment":"Excellent Movie","rating":8.0}]"#;
