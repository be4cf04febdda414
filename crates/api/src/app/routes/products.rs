use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    response::Response,
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use winnerlens_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/stats/categories", get(category_stats))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/:id/score", patch(update_score))
}

// Unparseable ids cannot name an existing product.
fn parse_id(raw: &str) -> Result<ProductId, Response> {
    raw.parse().map_err(|_| errors::product_not_found())
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    body: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::malformed_input(e),
    };
    let cmd = match body.validate() {
        Ok(cmd) => cmd,
        Err(fields) => return errors::validation_failed("Validation failed", fields),
    };

    match services.catalog.create(user.user_id(), cmd, Utc::now()) {
        Ok(product) => errors::created(dto::product_to_json(&product)),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    query: Result<Query<dto::ListProductsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::malformed_input(e),
    };
    let query = match query.validate() {
        Ok(q) => q,
        Err(fields) => return errors::validation_failed("Invalid query parameters", fields),
    };

    let page = match services.catalog.list(user.user_id(), &query) {
        Ok(page) => page.map(|p| dto::product_to_json(&p)),
        Err(e) => return errors::service_error_to_response(e),
    };

    errors::ok(json!({
        "data": page.data,
        "pagination": page.pagination,
    }))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.catalog.get(user.user_id(), id) {
        Ok(product) => errors::ok(dto::product_to_json(&product)),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateProductRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::malformed_input(e),
    };
    let cmd = match body.validate() {
        Ok(cmd) => cmd,
        Err(fields) => return errors::validation_failed("Validation failed", fields),
    };

    match services.catalog.update(user.user_id(), id, cmd, Utc::now()) {
        Ok(product) => errors::ok(dto::product_to_json(&product)),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.catalog.delete(user.user_id(), id) {
        Ok(()) => errors::ok(json!({ "message": "Product deleted successfully" })),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_score(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateScoreRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::malformed_input(e),
    };
    let scores = match body.validate() {
        Ok(s) => s,
        Err(fields) => return errors::validation_failed("Validation failed", fields),
    };

    match services.catalog.update_scores(user.user_id(), id, scores, Utc::now()) {
        Ok(product) => errors::ok(dto::product_to_json(&product)),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn category_stats(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
) -> Response {
    match services.catalog.category_stats(user.user_id()) {
        Ok(stats) => errors::ok(stats),
        Err(e) => errors::service_error_to_response(e),
    }
}
