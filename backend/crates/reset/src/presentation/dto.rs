//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/reset/forgot-password
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Response for POST /api/reset/forgot-password
///
/// Deliberately says nothing about whether the email matched an account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub request_id: Uuid,
}

/// Request for POST /api/reset/reset-password
///
/// Ids arrive as strings and are validated in the handler so a malformed id
/// is a 400 before the store is touched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub request_id: String,
    pub processed_by: String,
}

/// Request for POST /api/reset/reject-password
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectPasswordRequest {
    pub request_id: String,
    pub processed_by: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response for the two administrative transitions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetDecisionResponse {
    pub request_id: Uuid,
    pub status: String,
    pub processed_at_ms: i64,
}
