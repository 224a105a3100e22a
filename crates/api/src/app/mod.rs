//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store and credential wiring (in-memory or Postgres)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: the error translator

use std::path::Path;
use std::sync::Arc;

use axum::{Extension, Router, handler::HandlerWithoutStateExt, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use bloglist_auth::JwtValidator;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(config).await?);
    Ok(router(services, &config.static_dir))
}

/// Assemble the router around already-built services.
pub fn router(services: Arc<services::AppServices>, static_dir: &Path) -> Router {
    let jwt: Arc<dyn JwtValidator> = services.tokens.clone();
    let auth_state = middleware::AuthState {
        jwt,
        users: services.users.clone(),
    };

    // Principal is resolved for every /api request; guarded handlers decide.
    let api = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::principal_middleware,
    ));

    let assets = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(routes::system::unknown_endpoint.into_service());

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/info", get(routes::persons::info))
        .nest("/api", api)
        .fallback_service(assets)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(Extension(services)),
        )
}
