use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::{
    analysis,
    analyze::dtos::{AnalyzeRequest, AnalyzeResponse, ErrorResponse},
    app_state::AppState,
    fetcher::{FetchError, FetchErrorKind},
};

fn status_for(err: &FetchError) -> StatusCode {
    match err.kind() {
        FetchErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        FetchErrorKind::Forbidden => StatusCode::FORBIDDEN,
        FetchErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        FetchErrorKind::Blocked => StatusCode::UNPROCESSABLE_ENTITY,
        FetchErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        FetchErrorKind::DomainNotFound | FetchErrorKind::NetworkError | FetchErrorKind::Unknown => {
            StatusCode::BAD_GATEWAY
        }
    }
}

#[instrument(skip_all, fields(url = %payload.url.trim()))]
pub async fn analyze(State(state): State<AppState>, Json(payload): Json<AnalyzeRequest>) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error))).into_response();
    }

    // Cancelled when this future is dropped, e.g. when the client goes away.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match state.fetcher.fetch_with_cancel(&payload.url, &cancel).await {
        Ok(signals) => {
            let report = analysis::analyze(&signals);
            info!(final_url = %signals.url, score = report.score, "analysis complete");
            (StatusCode::OK, Json(AnalyzeResponse::new(signals, report))).into_response()
        }
        Err(err) => {
            warn!(kind = ?err.kind(), "analysis failed: {}", err);
            (status_for(&err), Json(ErrorResponse::from(&err))).into_response()
        }
    }
}
