use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Service banner listing the available endpoints.
pub async fn home() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "FMCSA Carrier Verification API",
        "endpoints": {
            "verify": "/api/verify/<mc_number>",
            "health": "/health"
        }
    }))
}

pub async fn not_found_fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "error": "Endpoint not found",
            "available_endpoints": [
                "/",
                "/health",
                "/verify-carrier",
                "/api/verify/<mc_number>",
                "/api/verify",
                "/search-loads",
                "/carriers-calls"
            ]
        })),
    )
}
