use std::net::SocketAddr;

use anyhow::Result;
use pagescore::{app_state::AppState, config::Config, middleware::RateLimit, router::router};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let state = AppState::new(&config)?;
    let rate_limit = RateLimit::new(config.rate_limit_max(), config.rate_limit_window_secs());
    let app = router(state, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    })
    .await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));

    if std::env::var("PAGESCORE_LOG_JSON").is_ok_and(|v| v == "1") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
