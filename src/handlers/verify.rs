use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{VerificationResult, VerificationStatus};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub mc_number: Option<String>,
}

/// `POST /verify-carrier` and `POST /api/verify`.
pub async fn verify_carrier(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let Some(mc_number) = request.mc_number else {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "MC number is required"
        )));
    };

    let result = state.fmcsa.verify(&mc_number).await;
    Ok(respond(result))
}

/// `GET /api/verify/:mc_number`.
pub async fn verify_carrier_by_path(
    State(state): State<AppState>,
    Path(mc_number): Path<String>,
) -> impl IntoResponse {
    respond(state.fmcsa.verify(&mc_number).await)
}

fn respond(result: VerificationResult) -> impl IntoResponse {
    (http_status(result.status), Json(result))
}

/// HTTP status derived from the verification outcome; everything the
/// registry actually answered maps to 200.
fn http_status(status: VerificationStatus) -> StatusCode {
    match status {
        VerificationStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        VerificationStatus::NotFound => StatusCode::NOT_FOUND,
        VerificationStatus::Invalid => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_result_taxonomy() {
        assert_eq!(
            http_status(VerificationStatus::Error),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            http_status(VerificationStatus::NotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            http_status(VerificationStatus::Invalid),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(http_status(VerificationStatus::Verified), StatusCode::OK);
        assert_eq!(http_status(VerificationStatus::Inactive), StatusCode::OK);
        assert_eq!(
            http_status(VerificationStatus::NotAuthorized),
            StatusCode::OK
        );
        assert_eq!(http_status(VerificationStatus::Unknown), StatusCode::OK);
    }
}
