use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode, header},
    middleware::from_fn_with_state,
    routing::get,
};
use catalogue_api::{
    config::{CatalogueConfig, RateLimitConfig},
    middleware::rate_limit::rate_limit,
    security::RateLimiter,
    source::{CatalogueSource, InMemorySource},
    state::AppState,
};
use tower::ServiceExt;

fn app(trust_forwarded_for: bool) -> Router {
    let state = AppState {
        source: Arc::new(CatalogueSource::Memory(InMemorySource::default())),
        limiter: Arc::new(RateLimiter::new(RateLimitConfig {
            per_minute: 2,
            trust_forwarded_for,
            ..RateLimitConfig::default()
        })),
        catalogue: CatalogueConfig::default(),
    };
    Router::new()
        .route("/", get(|| async { "ok" }))
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .with_state(state)
}

fn request_from(peer: &str, forwarded_for: Option<&str>) -> Request<Body> {
    let addr: SocketAddr = format!("{peer}:40000").parse().unwrap();
    let mut builder = Request::builder().uri("/").extension(ConnectInfo(addr));
    if let Some(value) = forwarded_for {
        builder = builder.header("x-forwarded-for", value);
    }
    builder.body(Body::empty()).unwrap()
}

fn header_value(response: &axum::response::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn accepted_responses_carry_rate_limit_headers() {
    let app = app(false);

    let first = app.clone().oneshot(request_from("10.0.0.1", None)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(header_value(&first, "x-ratelimit-limit").as_deref(), Some("2"));
    assert_eq!(header_value(&first, "x-ratelimit-remaining").as_deref(), Some("1"));

    let second = app.oneshot(request_from("10.0.0.1", None)).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(header_value(&second, "x-ratelimit-remaining").as_deref(), Some("0"));
}

#[tokio::test]
async fn request_over_the_limit_gets_429_with_retry_after() {
    let app = app(false);
    for _ in 0..2 {
        app.clone().oneshot(request_from("10.0.0.1", None)).await.unwrap();
    }

    let rejected = app.oneshot(request_from("10.0.0.1", None)).await.unwrap();
    assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = header_value(&rejected, header::RETRY_AFTER.as_str())
        .expect("retry-after header")
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));
    assert_eq!(header_value(&rejected, "x-ratelimit-limit").as_deref(), Some("2"));
    assert_eq!(header_value(&rejected, "x-ratelimit-remaining").as_deref(), Some("0"));
}

#[tokio::test]
async fn forged_forwarded_for_does_not_escape_the_peer_limit() {
    let app = app(false);

    let mut accepted = 0;
    for i in 0..10 {
        let forged = format!("1.2.3.{i}");
        let response = app
            .clone()
            .oneshot(request_from("10.0.0.1", Some(&forged)))
            .await
            .unwrap();
        if response.status() == StatusCode::OK {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 2);

    let other_peer = app.oneshot(request_from("10.0.0.2", None)).await.unwrap();
    assert_eq!(other_peer.status(), StatusCode::OK);
}

#[tokio::test]
async fn trusted_proxy_keys_on_forwarded_client() {
    let app = app(true);
    for _ in 0..2 {
        app.clone()
            .oneshot(request_from("10.0.0.1", Some("203.0.113.7")))
            .await
            .unwrap();
    }

    let same_client = app
        .clone()
        .oneshot(request_from("10.0.0.1", Some("203.0.113.7, 10.0.0.1")))
        .await
        .unwrap();
    assert_eq!(same_client.status(), StatusCode::TOO_MANY_REQUESTS);

    let other_client = app
        .oneshot(request_from("10.0.0.1", Some("203.0.113.8")))
        .await
        .unwrap();
    assert_eq!(other_client.status(), StatusCode::OK);
}
