//! Route definitions and application assembly

mod borrowing;

pub use borrowing::borrowing_routes;

use axum::http::{HeaderValue, Method};
use axum::{middleware::from_fn, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::handlers::health_check;
use crate::middleware::{hsts_header, request_tracing, security_headers};
use crate::state::AppState;

/// Build the full application router with its middleware stack
pub fn create_router(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .merge(borrowing_routes(&config.api_prefix))
        .with_state(state);

    if config.environment.is_production() {
        router = router.layer(from_fn(hsts_header));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(from_fn(request_tracing))
            .layer(from_fn(security_headers))
            .layer(configure_cors(config)),
    )
}

fn configure_cors(config: &Config) -> CorsLayer {
    let allowed_origins_str = config.cors_allowed_origins.as_deref().unwrap_or_default();

    if allowed_origins_str.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins_str
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
