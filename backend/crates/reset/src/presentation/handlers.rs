//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use platform::client::resolve_identifier;
use platform::rate_limit::MemoryRateLimitStore;
use std::sync::Arc;

use crate::application::config::ResetConfig;
use crate::application::{
    ProcessResetInput, ProcessResetUseCase, RejectResetInput, RejectResetUseCase, SubmitResetInput,
    SubmitResetUseCase,
};
use crate::domain::repository::{
    CredentialAuthority, Notifier, ResetRequestRepository, UserDirectory,
};
use crate::domain::value_objects::Email;
use crate::error::{ResetError, ResetResult};
use crate::presentation::dto::{
    ForgotPasswordRequest, ForgotPasswordResponse, RejectPasswordRequest, ResetDecisionResponse,
    ResetPasswordRequest,
};
use kernel::id::{ResetRequestId, UserId};

/// Shared state for reset handlers
#[derive(Clone)]
pub struct ResetAppState<R, C, N>
where
    R: ResetRequestRepository + UserDirectory + Clone + Send + Sync + 'static,
    C: CredentialAuthority + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub authority: Arc<C>,
    pub notifier: Arc<N>,
    pub governor: Arc<MemoryRateLimitStore>,
    pub config: Arc<ResetConfig>,
}

// ============================================================================
// Submit
// ============================================================================

/// POST /api/reset/forgot-password
pub async fn forgot_password<R, C, N>(
    State(state): State<ResetAppState<R, C, N>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<ForgotPasswordRequest>,
) -> ResetResult<Json<ForgotPasswordResponse>>
where
    R: ResetRequestRepository + UserDirectory + Clone + Send + Sync + 'static,
    C: CredentialAuthority + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    // Validation first: a malformed email is rejected before the rate
    // counter or the store sees the request.
    let email = Email::new(&req.email).map_err(|_| ResetError::InvalidEmail)?;

    let identifier = resolve_identifier(&headers, Some(addr.ip()));

    let use_case = SubmitResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.notifier.clone(),
        state.governor.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SubmitResetInput { email, identifier })
        .await?;

    Ok(Json(ForgotPasswordResponse {
        request_id: output.request_id.into_uuid(),
    }))
}

// ============================================================================
// Process
// ============================================================================

/// POST /api/reset/reset-password
pub async fn reset_password<R, C, N>(
    State(state): State<ResetAppState<R, C, N>>,
    Json(req): Json<ResetPasswordRequest>,
) -> ResetResult<Json<ResetDecisionResponse>>
where
    R: ResetRequestRepository + UserDirectory + Clone + Send + Sync + 'static,
    C: CredentialAuthority + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let request_id = parse_request_id(&req.request_id)?;
    let processed_by = parse_admin_id(&req.processed_by)?;

    let use_case = ProcessResetUseCase::new(
        state.repo.clone(),
        state.authority.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(ProcessResetInput {
            request_id,
            processed_by,
        })
        .await?;

    Ok(Json(ResetDecisionResponse {
        request_id: output.request_id.into_uuid(),
        status: output.status.code().to_string(),
        processed_at_ms: output.processed_at.timestamp_millis(),
    }))
}

// ============================================================================
// Reject
// ============================================================================

/// POST /api/reset/reject-password
pub async fn reject_password<R, C, N>(
    State(state): State<ResetAppState<R, C, N>>,
    Json(req): Json<RejectPasswordRequest>,
) -> ResetResult<Json<ResetDecisionResponse>>
where
    R: ResetRequestRepository + UserDirectory + Clone + Send + Sync + 'static,
    C: CredentialAuthority + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let request_id = parse_request_id(&req.request_id)?;
    let processed_by = parse_admin_id(&req.processed_by)?;

    let use_case = RejectResetUseCase::new(state.repo.clone());

    let output = use_case
        .execute(RejectResetInput {
            request_id,
            processed_by,
            reason: req.reason,
        })
        .await?;

    Ok(Json(ResetDecisionResponse {
        request_id: output.request_id.into_uuid(),
        status: output.status.code().to_string(),
        processed_at_ms: output.processed_at.timestamp_millis(),
    }))
}

// Well-formedness checks run before any store access.

fn parse_request_id(raw: &str) -> ResetResult<ResetRequestId> {
    ResetRequestId::parse_str(raw)
        .map_err(|_| ResetError::InvalidIdentifier(format!("requestId: {raw}")))
}

fn parse_admin_id(raw: &str) -> ResetResult<UserId> {
    UserId::parse_str(raw)
        .map_err(|_| ResetError::InvalidIdentifier(format!("processedBy: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_id() {
        let uuid = uuid::Uuid::new_v4();
        assert!(parse_request_id(&uuid.to_string()).is_ok());

        let err = parse_request_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, ResetError::InvalidIdentifier(_)));
    }

    #[test]
    fn test_parse_admin_id() {
        let uuid = uuid::Uuid::new_v4();
        assert!(parse_admin_id(&uuid.to_string()).is_ok());
        assert!(parse_admin_id("").is_err());
    }
}
