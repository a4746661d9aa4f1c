//! API key gate.
//!
//! Checks the `X-API-Key` header against the configured secret before
//! delegating to the route handler. Mounted only on business routes; the
//! banner and health probes are registered outside the gated router.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;

use crate::error::AppError;
use crate::AppState;

pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let secret = state.config.auth.api_secret_key.as_ref().ok_or_else(|| {
        AppError::ConfigError(anyhow::anyhow!("API authentication not configured"))
    })?;

    let provided = req
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!(
                "API key required. Include 'X-API-Key' header."
            ))
        })?;

    if provided != secret.expose_secret() {
        return Err(AppError::Unauthorized(anyhow::anyhow!("Invalid API key")));
    }

    Ok(next.run(req).await)
}
