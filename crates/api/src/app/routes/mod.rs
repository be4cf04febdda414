use axum::Router;

pub mod ai;
pub mod auth;
pub mod products;
pub mod system;
pub mod trends;

/// Router for all authenticated (owner-scoped) endpoints.
pub fn protected_router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/trends", trends::router())
        .nest("/ai", ai::router())
}
