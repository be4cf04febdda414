//! Response envelope and error mapping.
//!
//! Success: `{"success": true, "data": ...}`.
//! Failure: `{"success": false, "error": {"message", "code", "details"?}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use winnerlens_ai::AiError;
use winnerlens_core::DomainError;
use winnerlens_infra::ServiceError;

/// One failed input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> Response {
    respond(StatusCode::OK, data)
}

pub fn created<T: Serialize>(data: T) -> Response {
    respond(StatusCode::CREATED, data)
}

fn respond<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, axum::Json(json!({ "success": true, "data": data }))).into_response()
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": {
                "message": message.into(),
                "code": code,
            },
        })),
    )
        .into_response()
}

pub fn json_error_with_details(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    details: serde_json::Value,
) -> Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": {
                "message": message.into(),
                "code": code,
                "details": details,
            },
        })),
    )
        .into_response()
}

/// 400 with `details.errors` listing every failed field.
pub fn validation_failed(message: &str, errors: Vec<FieldError>) -> Response {
    json_error_with_details(
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        message,
        json!({ "errors": errors }),
    )
}

/// 400 for a body or query string that could not be decoded at all.
pub fn malformed_input(rejection: impl std::fmt::Display) -> Response {
    validation_failed(
        "Validation failed",
        vec![FieldError::new("body", rejection.to_string())],
    )
}

pub fn product_not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND", "Product not found")
}

/// Field-level rules keep the `details.errors` shape of request validation.
pub fn domain_error_to_response(err: DomainError) -> Response {
    match err.field() {
        Some(field) => validation_failed(
            "Validation failed",
            vec![FieldError::new(field, err.message())],
        ),
        None => json_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", err.message()),
    }
}

pub fn service_error_to_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::ProductNotFound => product_not_found(),
        ServiceError::EmailExists => {
            json_error(StatusCode::CONFLICT, "EMAIL_EXISTS", "Email already exists")
        }
        ServiceError::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid email or password",
        ),
        ServiceError::UserNotFound => {
            json_error(StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found")
        }
        other @ (ServiceError::Token(_)
        | ServiceError::PasswordHash(_)
        | ServiceError::StorageUnavailable) => {
            tracing::error!(error = %other, "internal service failure");
            internal_error()
        }
    }
}

/// Map an AI failure; `context` names the failed operation in the 500 message.
pub fn ai_error_to_response(err: AiError, context: &str) -> Response {
    match err {
        AiError::NotConfigured => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "AI_NOT_CONFIGURED",
            "Gemini API 키가 설정되지 않았습니다",
        ),
        AiError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
        upstream => {
            tracing::error!(error = %upstream, "AI generation failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI_GENERATION_FAILED",
                format!("{context} 중 오류가 발생했습니다: {upstream}"),
            )
        }
    }
}

pub fn internal_error() -> Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An unexpected error occurred",
    )
}
