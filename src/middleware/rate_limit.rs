use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{net::SocketAddr, sync::Arc};
use tracing::warn;

use crate::analyze::dtos::ErrorResponse;

/// Fixed-window request counter per client IP. Keeps analysis requests from
/// turning the service into a crawler pointed at third-party sites.
#[derive(Clone)]
pub struct RateLimit {
    store: Arc<DashMap<String, RateLimitData>>,
    max_requests: u32,
    window_seconds: i64,
}

#[derive(Debug, Clone)]
struct RateLimitData {
    count: u32,
    window_start: DateTime<Utc>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            max_requests,
            window_seconds,
        }
    }

    /// Count one request from `client` at `now`; `false` once over the limit.
    fn admit(&self, client: String, now: DateTime<Utc>) -> bool {
        self.evict_expired(now);

        let mut entry = self.store.entry(client).or_insert_with(|| RateLimitData {
            count: 0,
            window_start: now,
        });
        let data = entry.value_mut();

        if now.signed_duration_since(data.window_start) >= Duration::seconds(self.window_seconds) {
            data.count = 0;
            data.window_start = now;
        }

        data.count += 1;
        data.count <= self.max_requests
    }

    /// Drop clients whose window has run out. Must not be called while an
    /// entry is held.
    fn evict_expired(&self, now: DateTime<Utc>) {
        let window = Duration::seconds(self.window_seconds);
        self.store
            .retain(|_, data| now.signed_duration_since(data.window_start) < window);
    }
}

/// IP-based rate limiting middleware.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let ip = addr.ip().to_string();

    if !rate_limit.admit(ip.clone(), Utc::now()) {
        warn!(client = %ip, "analyze rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse::new(
                "Rate limit exceeded. Please wait a minute before analyzing another page.",
            )),
        )
            .into_response();
    }

    next.run(req).await
}
