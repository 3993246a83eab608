//! Cross-origin headers.
//!
//! Origin handling is `tower_http`'s [`CorsLayer`]: the request's `Origin` is
//! echoed byte-for-byte when the policy admits it and omitted otherwise.
//! `CorsLayer` only sends the allowed methods and headers on preflight, so
//! two [`SetResponseHeaderLayer`]s put them on every response.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Which request origins are echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsPolicy {
    /// Echo any origin
    #[default]
    Mirror,
    /// Echo only these origins (exact byte match)
    AllowList(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// An empty list, or one containing `*`, mirrors every origin.
    /// Entries that are not valid header values are skipped.
    pub fn from_origins(origins: &[String]) -> Self {
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            return CorsPolicy::Mirror;
        }

        let list = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsPolicy::AllowList(list)
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        match self {
            CorsPolicy::Mirror => true,
            CorsPolicy::AllowList(list) => list.iter().any(|o| o.as_bytes() == origin.as_bytes()),
        }
    }

    /// Layer answering preflights and echoing admitted origins.
    pub fn layer(&self) -> CorsLayer {
        let origin = match self {
            CorsPolicy::Mirror => AllowOrigin::mirror_request(),
            CorsPolicy::AllowList(list) => AllowOrigin::list(list.iter().cloned()),
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// `Access-Control-Allow-Methods` on every response.
pub fn allow_methods_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    )
}

/// `Access-Control-Allow-Headers` on every response.
pub fn allow_headers_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    )
}
