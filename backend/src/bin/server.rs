//! Sky position HTTP server binary.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sky-server
//!
//! # With a config file
//! SKY_CONFIG=server.toml cargo run --bin sky-server
//! ```
//!
//! # Environment Variables
//!
//! - `SKY_CONFIG`: optional TOML config file, read before the variables below
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `EPHEMERIS`: Ephemeris dataset (default: vsop87)
//! - `CORS_ALLOWED_ORIGINS`: comma-separated origins to echo (default: any)
//! - `STATIC_DIR`: directory served for unmatched paths (default: none)
//! - `BODY_LIMIT_BYTES`: largest request body (default: 65536)
//! - `RUST_LOG`: Log filter directives, e.g. `info,tower_http=debug` (default: info)

use std::env;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sky_position::config::ServerConfig;
use sky_position::http::{create_router, AppState};
use sky_position::services::warm_up;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting sky position server");

    let config = ServerConfig::load()?;
    let addr = config.bind_addr()?;
    info!(
        ephemeris = %config.ephemeris,
        static_dir = ?config.static_dir,
        cors_origins = config.cors_allowed_origins.len(),
        "Configuration loaded"
    );

    let state = AppState::from_config(config);

    // A failing ephemeris should stop startup, not the first request.
    let ephemeris = state.ephemeris.clone();
    tokio::task::spawn_blocking(move || warm_up(ephemeris.as_ref())).await??;

    let app = create_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Filter from `RUST_LOG` directives, falling back to `info` when unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
