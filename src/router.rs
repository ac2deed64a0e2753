use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    analyze::analyze,
    app_state::AppState,
    health::health_check,
    middleware::{RateLimit, rate_limit_middleware},
};

/// The rate limit applies to `/v1/analyze` only, and needs the client
/// address: serve with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router(state: AppState, rate_limit: RateLimit) -> Router {
    Router::new()
        .route(
            "/v1/analyze",
            post(analyze).route_layer(middleware::from_fn_with_state(
                rate_limit,
                rate_limit_middleware,
            )),
        )
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
