use axum::{response::IntoResponse, Json};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "WinnerLens API is running",
    }))
}

/// Endpoint index for `/api/v1`.
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "WinnerLens API v1",
        "endpoints": {
            "health": "/health",
            "auth": "/api/v1/auth",
            "products": "/api/v1/products",
            "trends": "/api/v1/trends",
            "ai": "/api/v1/ai",
        },
    }))
}
