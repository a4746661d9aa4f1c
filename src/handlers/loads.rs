use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchLoadsRequest {
    pub equipment_type: Option<String>,
}

/// `POST /search-loads`.
pub async fn search_loads(
    State(state): State<AppState>,
    Json(request): Json<SearchLoadsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(equipment_type) = request.equipment_type else {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "equipment_type is required"
        )));
    };

    let loads = state.store.find_loads_by_equipment(&equipment_type).await?;

    Ok(Json(json!({
        "status": "success",
        "equipment_type": equipment_type,
        "count": loads.len(),
        "loads": loads,
    })))
}
