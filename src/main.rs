use axum::{
    Json, Router,
    http::{HeaderName, Method, Request, Response, StatusCode, Uri},
    middleware::from_fn_with_state,
    routing::get,
};
use chrono::Utc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::{net::SocketAddr, sync::Arc, time::Duration};

use catalogue_api::{
    config::AppConfig,
    middleware::rate_limit::rate_limit,
    response::{ApiResponse, Meta},
    routes::{create_api_router, doc::scalar_docs, health},
    security::RateLimiter,
    source::{CatalogueSource, JsonFileSource},
    state::AppState,
};

const LIMITER_CLEANUP_EVERY: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalogue_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        products = %config.products_path.display(),
        page_size = config.catalogue.page_size,
        "catalogue source configured"
    );

    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    let state = AppState {
        source: Arc::new(CatalogueSource::File(JsonFileSource::new(
            config.products_path.clone(),
        ))),
        limiter: Arc::clone(&limiter),
        catalogue: config.catalogue.clone(),
    };

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LIMITER_CLEANUP_EVERY);
        loop {
            ticker.tick().await;
            let removed = limiter.cleanup(Utc::now()).await;
            tracing::debug!(removed, "rate limiter cleanup completed");
        }
    });

    let api_router =
        create_api_router().layer(from_fn_with_state(state.clone(), rate_limit));
    let concurrency_limit_layer = ConcurrencyLimitLayer::new(100);
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_router)
        .merge(scalar_docs())
        .fallback(not_found)
        .layer(cors_layer)
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(concurrency_limit_layer)
        .with_state(state);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
