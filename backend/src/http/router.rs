//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and
//! creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use super::cors::{allow_headers_layer, allow_methods_layer};
use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // OPTIONS preflights are answered by the CORS layer.
        .route("/api/get-obj", post(handlers::get_obj));

    if let Some(dir) = &state.config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(state.config.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(state.cors.layer())
        .layer(allow_methods_layer())
        .layer(allow_headers_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn test_router_creation() {
        let state = AppState::from_config(ServerConfig::default());
        let _router = create_router(state);
    }

    #[test]
    fn test_router_with_static_dir() {
        let config = ServerConfig {
            static_dir: Some(std::env::temp_dir()),
            ..Default::default()
        };
        let _router = create_router(AppState::from_config(config));
    }
}
