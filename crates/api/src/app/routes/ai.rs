use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::Response,
    routing::post,
    Json, Router,
};
use serde_json::json;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route("/product-name", post(generate_product_name))
        .route("/product-description", post(generate_product_description))
}

pub async fn generate_product_name(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    body: Result<Json<dto::ProductNameRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::malformed_input(e),
    };
    let (category, keywords) = match body.validate() {
        Ok(v) => v,
        Err(fields) => return errors::validation_failed("카테고리와 키워드는 필수입니다", fields),
    };

    match services.copywriter.generate_names(&category, &keywords).await {
        Ok(names) => {
            tracing::info!(user_id = %user.user_id(), count = names.len(), "product names generated");
            errors::ok(json!({ "names": names }))
        }
        Err(e) => errors::ai_error_to_response(e, "AI 상품명 생성"),
    }
}

pub async fn generate_product_description(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    body: Result<Json<dto::ProductDescriptionRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::malformed_input(e),
    };
    let input = match body.validate() {
        Ok(v) => v,
        Err(fields) => return errors::validation_failed("상품명, 카테고리, 특징은 필수입니다", fields),
    };

    match services
        .copywriter
        .generate_description(&input.product_name, &input.category, &input.features)
        .await
    {
        Ok(description) => {
            tracing::info!(user_id = %user.user_id(), "product description generated");
            errors::ok(json!({ "description": description }))
        }
        Err(e) => errors::ai_error_to_response(e, "AI 상세 설명 생성"),
    }
}
