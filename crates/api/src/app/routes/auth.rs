use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::UserContext;
use crate::middleware::{self, AuthState};

pub fn router(auth_state: AuthState) -> Router {
    let me = Router::new()
        .route("/me", get(me))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(me)
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::malformed_input(e),
    };
    let cmd = match body.validate() {
        Ok(cmd) => cmd,
        Err(fields) => return errors::validation_failed("Validation failed", fields),
    };

    // bcrypt is CPU-bound.
    let result = tokio::task::spawn_blocking(move || services.accounts.register(cmd, Utc::now())).await;
    match result {
        Ok(Ok(session)) => errors::created(session),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(e) => {
            tracing::error!(error = %e, "register task failed");
            errors::internal_error()
        }
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::malformed_input(e),
    };
    let cmd = match body.validate() {
        Ok(cmd) => cmd,
        Err(fields) => return errors::validation_failed("Validation failed", fields),
    };

    let result = tokio::task::spawn_blocking(move || services.accounts.login(cmd, Utc::now())).await;
    match result {
        Ok(Ok(session)) => errors::ok(session),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(e) => {
            tracing::error!(error = %e, "login task failed");
            errors::internal_error()
        }
    }
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
) -> Response {
    match services.accounts.current_user(user.user_id()) {
        Ok(profile) => errors::ok(profile),
        Err(e) => errors::service_error_to_response(e),
    }
}
