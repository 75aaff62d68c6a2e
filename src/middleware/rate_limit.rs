use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{error::AppError, state::AppState};

pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let identifier = client_identifier(&request, state.limiter.config().trust_forwarded_for);
    let now = Utc::now();
    let decision = state.limiter.check(&identifier, now).await;

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        AppError::TooManyRequests {
            retry_after_secs: decision.retry_after_secs(now),
        }
        .into_response()
    };
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    response
}

/// Peer address of the connection. The first `x-forwarded-for` hop is used
/// instead only when the service sits behind a trusted proxy.
pub fn client_identifier(request: &Request, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
