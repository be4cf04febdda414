//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: stores and application services
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs, input validation and JSON mapping helpers
//! - `errors.rs`: response envelope and error mapping

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use winnerlens_ai::AiError;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Result<Router, AiError> {
    let jwt = Arc::new(winnerlens_auth::Hs256JwtValidator::new(config.jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { jwt };

    let services = Arc::new(services::build_services(config)?);

    // Protected routes: require a valid bearer token.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state.clone(),
        middleware::auth_middleware,
    ));

    let api = Router::new()
        .route("/", get(routes::system::index))
        .nest("/auth", routes::auth::router(auth_state))
        .merge(protected);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/v1", api)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
}
