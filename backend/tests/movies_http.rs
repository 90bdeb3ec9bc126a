//! Movie aggregation service end to end: the real app, real adapters and a
//! stub pair of upstreams.

mod stub;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, test, web};
use movies_backend::inbound::http::health::HealthState;
use movies_backend::server::{build_movies_app, movies_state};
use serde_json::{Value, json};
use stub::{BATMAN, BATMAN_REVIEWS, DARK_KNIGHT, Hits, Stub};

fn upstreams(info_hits: Hits) -> Stub {
    Stub::serve(move |cfg| {
        let info_hits = info_hits.clone();
        cfg.route(
            "/v1/movie_infos/stream",
            web::get().to(|| async {
                HttpResponse::Ok()
                    .content_type("application/x-ndjson")
                    .body(format!("{BATMAN}\n{DARK_KNIGHT}\n"))
            }),
        )
        .route(
            "/v1/movie_infos/{id}",
            web::get().to(move |path: web::Path<String>| {
                info_hits.record();
                async move {
                    match path.as_str() {
                        "m1" => HttpResponse::Ok().content_type("application/json").body(BATMAN),
                        "gone" => HttpResponse::Ok().finish(),
                        "flaky" => HttpResponse::ServiceUnavailable().finish(),
                        _ => HttpResponse::NotFound().finish(),
                    }
                }
            }),
        )
        .route(
            "/v1/reviews",
            web::get().to(|| async {
                HttpResponse::Ok()
                    .content_type("application/json")
                    .body(BATMAN_REVIEWS)
            }),
        );
    })
}

async fn get(stub: &Stub, uri: &str) -> actix_web::dev::ServiceResponse {
    let state = movies_state(stub.client("v1/movie_infos"), stub.client("v1/reviews"));
    let app = test::init_service(build_movies_app(
        web::Data::new(HealthState::new()),
        web::Data::new(state),
    ))
    .await;
    test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await
}

#[actix_web::test]
async fn composes_info_with_its_reviews() {
    let stub = upstreams(Hits::default());

    let response = get(&stub, "/v1/movies/m1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["info"]["title"], json!("Batman Begins"));
    assert_eq!(body["info"]["releaseDate"], json!("2005-06-15"));
    assert_eq!(body["reviews"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn empty_info_body_is_a_404() {
    let stub = upstreams(Hits::default());

    let response = get(&stub, "/v1/movies/gone").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn info_client_error_is_mirrored() {
    let stub = upstreams(Hits::default());

    let response = get(&stub, "/v1/movies/unknown").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({"messages": ["Unable to find info with id [unknown]"], "statusCode": 404})
    );
}

#[actix_web::test]
async fn info_server_error_is_mirrored_after_retries() {
    let hits = Hits::default();
    let stub = upstreams(hits.clone());

    let response = get(&stub, "/v1/movies/flaky").await;

    assert_eq!(hits.count(), 4);
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body["messages"],
        json!(["Unable to find info with id [flaky] [server_down: try again!]"])
    );
    assert_eq!(body["statusCode"], json!(503));
}

#[actix_web::test]
async fn stream_relays_every_info_record() {
    let stub = upstreams(Hits::default());

    let response = get(&stub, "/v1/movies/stream").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = test::read_body(response).await;
    let ids: Vec<String> = body
        .split(|byte| *byte == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| {
            let value: Value = serde_json::from_slice(line).expect("json line");
            value["id"].as_str().unwrap_or_default().to_owned()
        })
        .collect();
    assert_eq!(ids, ["m1", "m2"]);
}

#[actix_web::test]
async fn health_probes_are_served() {
    let stub = upstreams(Hits::default());

    let response = get(&stub, "/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
}
