//! Upstream adapters against a live stub: retry counts, status mapping and
//! NDJSON decoding over real sockets.

mod stub;

use actix_web::{HttpResponse, web};
use futures_util::{StreamExt, TryStreamExt};
use movies_backend::domain::ports::{MovieInfoSource, ReviewSource, UpstreamError};
use movies_backend::domain::{Classify, ErrorClassification};
use movies_backend::outbound::upstream::{MovieInfoHttpSource, ReviewHttpSource};
use stub::{BATMAN, BATMAN_REVIEWS, DARK_KNIGHT, Hits, Stub};

fn info_source(stub: &Stub) -> MovieInfoHttpSource {
    MovieInfoHttpSource::new(stub.client("v1/movie_infos"))
}

fn review_source(stub: &Stub) -> ReviewHttpSource {
    ReviewHttpSource::new(stub.client("v1/reviews"))
}

#[actix_web::test]
async fn persistent_server_errors_make_four_attempts() {
    let hits = Hits::default();
    let counter = hits.clone();
    let stub = Stub::serve(move |cfg| {
        let counter = counter.clone();
        cfg.route(
            "/v1/movie_infos/{id}",
            web::get().to(move || {
                counter.record();
                async { HttpResponse::InternalServerError().body("boom") }
            }),
        );
    });

    let error = info_source(&stub)
        .fetch_by_id("m1")
        .await
        .expect_err("server keeps failing");

    assert_eq!(hits.count(), 4);
    assert_eq!(
        error,
        UpstreamError::server(
            movies_backend::domain::ports::Upstream::MovieInfo,
            500,
            "Unable to find info with id [m1] [server_down: try again!]",
        )
    );
}

#[actix_web::test]
async fn success_on_the_fourth_attempt_is_returned() {
    let hits = Hits::default();
    let counter = hits.clone();
    let stub = Stub::serve(move |cfg| {
        let counter = counter.clone();
        cfg.route(
            "/v1/movie_infos/{id}",
            web::get().to(move || {
                let previous = counter.record();
                async move {
                    if previous < 3 {
                        HttpResponse::ServiceUnavailable().finish()
                    } else {
                        HttpResponse::Ok()
                            .content_type("application/json")
                            .body(BATMAN)
                    }
                }
            }),
        );
    });

    let info = info_source(&stub)
        .fetch_by_id("m1")
        .await
        .expect("fourth attempt succeeds")
        .expect("info present");

    assert_eq!(hits.count(), 4);
    assert_eq!(info.title, "Batman Begins");
    assert_eq!(info.year, 2005);
}

#[actix_web::test]
async fn client_errors_are_attempted_once() {
    let hits = Hits::default();
    let counter = hits.clone();
    let stub = Stub::serve(move |cfg| {
        let counter = counter.clone();
        cfg.route(
            "/v1/movie_infos/{id}",
            web::get().to(move || {
                counter.record();
                async { HttpResponse::BadRequest().finish() }
            }),
        );
    });

    let error = info_source(&stub)
        .fetch_by_id("bad")
        .await
        .expect_err("client error surfaces");

    assert_eq!(hits.count(), 1);
    assert_eq!(error.status(), Some(400));
    assert_eq!(error.to_string(), "Unable to find info with id [bad]");
}

#[actix_web::test]
async fn missing_reviews_are_an_empty_list() {
    let hits = Hits::default();
    let counter = hits.clone();
    let stub = Stub::serve(move |cfg| {
        let counter = counter.clone();
        cfg.route(
            "/v1/reviews",
            web::get().to(move || {
                counter.record();
                async { HttpResponse::NotFound().finish() }
            }),
        );
    });

    let reviews: Vec<_> = review_source(&stub)
        .fetch_by_movie_info_id("m1")
        .try_collect()
        .await
        .expect("404 is not an error");

    assert!(reviews.is_empty());
    assert_eq!(hits.count(), 1);
}

#[actix_web::test]
async fn other_review_client_errors_fail_without_retry() {
    let hits = Hits::default();
    let counter = hits.clone();
    let stub = Stub::serve(move |cfg| {
        let counter = counter.clone();
        cfg.route(
            "/v1/reviews",
            web::get().to(move || {
                counter.record();
                async { HttpResponse::BadRequest().body("bad movieInfoId") }
            }),
        );
    });

    let error = review_source(&stub)
        .fetch_by_movie_info_id("m1")
        .try_collect::<Vec<_>>()
        .await
        .expect_err("400 is a client error");

    assert_eq!(hits.count(), 1);
    assert_eq!(error.status(), Some(400));
    assert_eq!(error.classification(), ErrorClassification::ClientError);
    assert_eq!(
        error.to_string(),
        "Unable to find reviews for movie info id [m1]"
    );
}

#[actix_web::test]
async fn reviews_are_requested_by_movie_info_id() {
    let stub = Stub::serve(|cfg| {
        cfg.route(
            "/v1/reviews",
            web::get().to(|query: web::Query<std::collections::HashMap<String, String>>| async move {
                if query.get("movieInfoId").map(String::as_str) == Some("m1") {
                    HttpResponse::Ok()
                        .content_type("application/json")
                        .body(BATMAN_REVIEWS)
                } else {
                    HttpResponse::Ok().content_type("application/json").body("[]")
                }
            }),
        );
    });

    let reviews: Vec<_> = review_source(&stub)
        .fetch_by_movie_info_id("m1")
        .try_collect()
        .await
        .expect("reviews");

    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].comment, "Awesome Movie");
}

#[actix_web::test]
async fn persistent_review_server_errors_exhaust_retries() {
    let hits = Hits::default();
    let counter = hits.clone();
    let stub = Stub::serve(move |cfg| {
        let counter = counter.clone();
        cfg.route(
            "/v1/reviews",
            web::get().to(move || {
                counter.record();
                async { HttpResponse::BadGateway().finish() }
            }),
        );
    });

    let outcome: Result<Vec<_>, _> = review_source(&stub)
        .fetch_by_movie_info_id("m1")
        .try_collect()
        .await;

    let error = outcome.expect_err("reviews upstream down");
    assert_eq!(hits.count(), 4);
    assert_eq!(error.status(), Some(502));
    assert_eq!(
        error.to_string(),
        "Unable to find reviews for movie info id [m1] [server_down: try again!]"
    );
}

#[actix_web::test]
async fn info_stream_decodes_ndjson_and_reopens_after_server_errors() {
    let hits = Hits::default();
    let counter = hits.clone();
    let stub = Stub::serve(move |cfg| {
        let counter = counter.clone();
        cfg.route(
            "/v1/movie_infos/stream",
            web::get().to(move || {
                let previous = counter.record();
                async move {
                    if previous == 0 {
                        HttpResponse::InternalServerError().finish()
                    } else {
                        HttpResponse::Ok()
                            .content_type("application/x-ndjson")
                            .body(format!("{BATMAN}\n\n{DARK_KNIGHT}\n"))
                    }
                }
            }),
        );
    });

    let items: Vec<_> = info_source(&stub).stream_all().collect().await;

    assert_eq!(hits.count(), 2);
    let titles: Vec<String> = items
        .into_iter()
        .map(|item| item.expect("decoded info").title)
        .collect();
    assert_eq!(titles, ["Batman Begins", "The Dark Knight"]);
}

#[actix_web::test]
async fn info_stream_surfaces_exhausted_server_errors_once() {
    let hits = Hits::default();
    let counter = hits.clone();
    let stub = Stub::serve(move |cfg| {
        let counter = counter.clone();
        cfg.route(
            "/v1/movie_infos/stream",
            web::get().to(move || {
                counter.record();
                async { HttpResponse::InternalServerError().finish() }
            }),
        );
    });

    let items: Vec<_> = info_source(&stub).stream_all().collect().await;

    assert_eq!(hits.count(), 4);
    assert_eq!(items.len(), 1);
    let error = items
        .into_iter()
        .next()
        .expect("one item")
        .expect_err("final error");
    assert_eq!(
        error.to_string(),
        "Unable to find any movie info. [server_down: try again!]"
    );
}
