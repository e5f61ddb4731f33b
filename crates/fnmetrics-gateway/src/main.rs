//! fnmetrics gateway binary.
//!
//! - Function listing: GET /system/functions (provider list + invocation metrics)
//! - Config from $FNMETRICS_CONFIG (default fnmetrics.yaml)
//! - Log filter from RUST_LOG

use tracing_subscriber::{fmt, EnvFilter};

use fnmetrics_core::error::{FnMetricsError, Result};
use fnmetrics_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, kind = e.kind().as_str(), "fnmetrics-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "fnmetrics-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| FnMetricsError::Internal(format!("bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| FnMetricsError::Internal(format!("server failed: {e}")))
}
