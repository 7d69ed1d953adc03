//! CORS layer configuration.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use storefront_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// Credentials are allowed so the refresh cookie reaches the refresh
/// endpoint from the configured frontends; that rules out wildcard origins.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter(|o| o.as_str() != "*")
        .filter_map(|o| o.parse().ok())
        .collect();

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
