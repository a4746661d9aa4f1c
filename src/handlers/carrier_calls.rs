use axum::{extract::State, Json};
use mongodb::bson;
use serde_json::json;

use crate::error::AppError;
use crate::AppState;

/// `POST /carriers-calls`. Accepts an arbitrary JSON object, stamps it
/// with the current UTC time and inserts it into the carrier-calls
/// collection. The store never recomputes the timestamp.
pub async fn record_carrier_call(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut document = bson::to_document(&payload).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Request body must be a JSON object: {}", e))
    })?;

    document.insert(
        "created_at",
        bson::DateTime::from_chrono(chrono::Utc::now()),
    );

    let receipt = state.store.insert_carrier_call(document).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Carrier call recorded",
        "data": {
            "inserted_id": receipt.inserted_id,
            "acknowledged": receipt.acknowledged,
        }
    })))
}
