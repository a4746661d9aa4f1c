use serde::{Deserialize, Serialize};

/// Outcome taxonomy for a carrier lookup.
///
/// `Verified`, `Inactive`, `NotAuthorized` and `Unknown` come from the
/// registry's own status codes; the rest describe what went wrong before a
/// carrier record could be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Inactive,
    NotAuthorized,
    #[default]
    Unknown,
    NotFound,
    Invalid,
    Error,
}

/// Result of a single carrier verification. Built once per request and
/// never persisted or mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    pub mc_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_to_operate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bipd_insurance_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_insurance_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bipd_insurance_on_file: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_insurance_on_file: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_drivers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_power_units: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<PhysicalAddress>,
    /// Raw registry body, attached only when the response shape could not
    /// be parsed, for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<serde_json::Value>,
}

impl VerificationResult {
    /// Result carrying nothing but a status, an identifier and a message.
    pub fn failure(
        status: VerificationStatus,
        mc_number: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            status,
            mc_number: mc_number.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}
