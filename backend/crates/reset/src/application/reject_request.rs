//! Reject Reset Request Use Case
//!
//! Administrator declines a pending request. Symmetric to process but never
//! contacts the identity provider.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::repository::ResetRequestRepository;
use crate::domain::value_objects::ResetStatus;
use crate::error::{ResetError, ResetResult};
use kernel::id::{ResetRequestId, UserId};

/// Input DTO for reject
#[derive(Debug, Clone)]
pub struct RejectResetInput {
    pub request_id: ResetRequestId,
    pub processed_by: UserId,
    /// Free-text reason, logged for the audit trail
    pub reason: Option<String>,
}

/// Output DTO for reject
#[derive(Debug, Clone)]
pub struct RejectResetOutput {
    pub request_id: ResetRequestId,
    pub status: ResetStatus,
    pub processed_at: DateTime<Utc>,
}

/// Reject Reset Request Use Case
pub struct RejectResetUseCase<R>
where
    R: ResetRequestRepository,
{
    request_repo: Arc<R>,
}

impl<R> RejectResetUseCase<R>
where
    R: ResetRequestRepository,
{
    pub fn new(request_repo: Arc<R>) -> Self {
        Self { request_repo }
    }

    pub async fn execute(&self, input: RejectResetInput) -> ResetResult<RejectResetOutput> {
        let request = self
            .request_repo
            .find_by_id(input.request_id)
            .await?
            .ok_or(ResetError::RequestNotFound)?;

        if !request.is_pending() {
            return Err(ResetError::AlreadyProcessed);
        }

        let updated = self
            .request_repo
            .complete(input.request_id, ResetStatus::Rejected, input.processed_by)
            .await?
            .ok_or(ResetError::AlreadyProcessed)?;

        let processed_at = updated.processed_at.unwrap_or_else(Utc::now);

        tracing::info!(
            request_id = %updated.id,
            processed_by = %input.processed_by,
            reason = input.reason.as_deref().unwrap_or(""),
            "Reset request rejected"
        );

        Ok(RejectResetOutput {
            request_id: updated.id,
            status: updated.status,
            processed_at,
        })
    }
}
