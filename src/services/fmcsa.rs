//! FMCSA registry client.
//!
//! Proxies docket-number lookups to the government motor-carrier registry
//! and maps its status codes into the service's verification taxonomy.
//! Failures never bubble out of `verify`; they are encoded in the result's
//! status so the HTTP layer can translate them uniformly.

use crate::config::FmcsaConfig;
use crate::models::{PhysicalAddress, VerificationResult, VerificationStatus};
use reqwest::{header, Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;

const USER_AGENT: &str = "FreightBroker/1.0";

#[derive(Clone)]
pub struct FmcsaClient {
    client: Client,
    config: FmcsaConfig,
}

#[derive(Debug, Deserialize)]
struct DocketResponse {
    #[serde(default)]
    content: Vec<DocketEntry>,
}

#[derive(Debug, Deserialize)]
struct DocketEntry {
    carrier: Option<CarrierRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CarrierRecord {
    dot_number: Option<i64>,
    legal_name: Option<String>,
    status_code: Option<String>,
    allowed_to_operate: Option<String>,
    safety_rating: Option<String>,
    bipd_insurance_required: Option<String>,
    cargo_insurance_required: Option<String>,
    bipd_insurance_on_file: Option<serde_json::Value>,
    cargo_insurance_on_file: Option<serde_json::Value>,
    total_drivers: Option<i64>,
    total_power_units: Option<i64>,
    phy_street: Option<String>,
    phy_city: Option<String>,
    phy_state: Option<String>,
    phy_zipcode: Option<String>,
}

impl FmcsaClient {
    pub fn new(config: FmcsaConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    /// Verify a carrier identifier against the registry.
    ///
    /// The identifier is canonicalized to its digit-only form before the
    /// lookup; `"MC-227271"`, `"mc227271"` and `"227271"` all resolve the
    /// same docket.
    pub async fn verify(&self, mc_number: &str) -> VerificationResult {
        let clean = canonicalize(mc_number);
        if clean.is_empty() {
            return VerificationResult::failure(
                VerificationStatus::Invalid,
                mc_number,
                "Invalid MC number format",
            );
        }

        let webkey = match &self.config.webkey {
            Some(key) => key.expose_secret().clone(),
            None => {
                return VerificationResult::failure(
                    VerificationStatus::Error,
                    clean,
                    "FMCSA API key (webkey) is required but not configured",
                )
            }
        };

        let url = format!("{}/carriers/docket-number/{}", self.config.base_url, clean);

        let response = match self
            .client
            .get(&url)
            .query(&[("webKey", webkey.as_str())])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                tracing::warn!(mc_number = %clean, "FMCSA lookup timed out");
                return VerificationResult::failure(
                    VerificationStatus::Error,
                    mc_number,
                    "FMCSA API timeout",
                );
            }
            Err(err) => {
                tracing::warn!(mc_number = %clean, error = %err, "FMCSA lookup failed");
                return VerificationResult::failure(
                    VerificationStatus::Error,
                    mc_number,
                    format!("Request failed: {}", err),
                );
            }
        };

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return VerificationResult::failure(
                    VerificationStatus::NotFound,
                    clean,
                    "MC number not found in FMCSA database",
                )
            }
            other => {
                return VerificationResult::failure(
                    VerificationStatus::Error,
                    clean,
                    format!("FMCSA API returned status {}", other.as_u16()),
                )
            }
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                return VerificationResult::failure(
                    VerificationStatus::Error,
                    clean,
                    format!("Request failed: {}", err),
                )
            }
        };

        parse_docket_response(body, &clean)
    }
}

/// Reduce an identifier to its digit-only form.
fn canonicalize(mc_number: &str) -> String {
    mc_number.chars().filter(char::is_ascii_digit).collect()
}

fn parse_docket_response(body: serde_json::Value, mc_number: &str) -> VerificationResult {
    let parsed: DocketResponse = match serde_json::from_value(body.clone()) {
        Ok(parsed) => parsed,
        Err(err) => {
            let mut result = VerificationResult::failure(
                VerificationStatus::Error,
                mc_number,
                format!("Unexpected FMCSA response format: {}", err),
            );
            result.raw_response = Some(body);
            return result;
        }
    };

    let Some(entry) = parsed.content.into_iter().next() else {
        return VerificationResult::failure(
            VerificationStatus::NotFound,
            mc_number,
            "No carrier data found in FMCSA response",
        );
    };

    let Some(carrier) = entry.carrier else {
        let mut result = VerificationResult::failure(
            VerificationStatus::Error,
            mc_number,
            "Unexpected FMCSA response format: missing carrier record",
        );
        result.raw_response = Some(body);
        return result;
    };

    let status_code = carrier.status_code.unwrap_or_default();
    let allowed_to_operate = carrier.allowed_to_operate.unwrap_or_default();
    let status = derive_status(&status_code, &allowed_to_operate);

    VerificationResult {
        status,
        mc_number: mc_number.to_string(),
        error: None,
        dot_number: carrier.dot_number,
        company_name: Some(carrier.legal_name.unwrap_or_else(|| "Unknown".to_string())),
        bipd_insurance_required: Some(carrier.bipd_insurance_required.as_deref() == Some("Y")),
        cargo_insurance_required: Some(carrier.cargo_insurance_required.as_deref() == Some("Y")),
        bipd_insurance_on_file: carrier.bipd_insurance_on_file,
        cargo_insurance_on_file: carrier.cargo_insurance_on_file,
        safety_rating: carrier.safety_rating,
        total_drivers: carrier.total_drivers,
        total_power_units: carrier.total_power_units,
        physical_address: Some(PhysicalAddress {
            street: carrier.phy_street,
            city: carrier.phy_city,
            state: carrier.phy_state,
            zipcode: carrier.phy_zipcode,
        }),
        status_code: Some(status_code),
        allowed_to_operate: Some(allowed_to_operate),
        raw_response: None,
    }
}

/// Ordered decision list over the registry's raw fields; first match wins.
fn derive_status(status_code: &str, allowed_to_operate: &str) -> VerificationStatus {
    if status_code == "A" && allowed_to_operate == "Y" {
        VerificationStatus::Verified
    } else if matches!(status_code, "I" | "U") {
        VerificationStatus::Inactive
    } else if allowed_to_operate == "N" {
        VerificationStatus::NotAuthorized
    } else {
        VerificationStatus::Unknown
    }
}
