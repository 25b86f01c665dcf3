//! Process Reset Request Use Case
//!
//! Administrator approves a pending request: the identity provider rotates
//! the credential, then the request transitions to processed.

use chrono::{DateTime, Utc};
use platform::crypto::random_token;
use std::sync::Arc;

use crate::application::config::ResetConfig;
use crate::domain::repository::{CredentialAuthority, ResetRequestRepository};
use crate::domain::value_objects::ResetStatus;
use crate::error::{ResetError, ResetResult};
use kernel::id::{ResetRequestId, UserId};

/// Input DTO for process
#[derive(Debug, Clone)]
pub struct ProcessResetInput {
    pub request_id: ResetRequestId,
    pub processed_by: UserId,
}

/// Output DTO for process
#[derive(Debug, Clone)]
pub struct ProcessResetOutput {
    pub request_id: ResetRequestId,
    pub status: ResetStatus,
    pub processed_at: DateTime<Utc>,
}

/// Process Reset Request Use Case
pub struct ProcessResetUseCase<R, C>
where
    R: ResetRequestRepository,
    C: CredentialAuthority,
{
    request_repo: Arc<R>,
    authority: Arc<C>,
    config: Arc<ResetConfig>,
}

impl<R, C> ProcessResetUseCase<R, C>
where
    R: ResetRequestRepository,
    C: CredentialAuthority,
{
    pub fn new(request_repo: Arc<R>, authority: Arc<C>, config: Arc<ResetConfig>) -> Self {
        Self {
            request_repo,
            authority,
            config,
        }
    }

    pub async fn execute(&self, input: ProcessResetInput) -> ResetResult<ProcessResetOutput> {
        let request = self
            .request_repo
            .find_by_id(input.request_id)
            .await?
            .ok_or(ResetError::RequestNotFound)?;

        if !request.is_pending() {
            return Err(ResetError::AlreadyProcessed);
        }

        // Rotate the credential before the status transition: a provider
        // failure must leave the request pending and retryable.
        if let Some(user_id) = request.user_id {
            let credential = random_token(self.config.temp_credential_bytes);
            self.authority.update_credential(user_id, &credential).await?;
        }

        // Conditional write; a concurrent processor losing the race gets
        // None here and surfaces the conflict.
        let updated = self
            .request_repo
            .complete(input.request_id, ResetStatus::Processed, input.processed_by)
            .await?
            .ok_or(ResetError::AlreadyProcessed)?;

        let processed_at = updated.processed_at.unwrap_or_else(Utc::now);

        tracing::info!(
            request_id = %updated.id,
            processed_by = %input.processed_by,
            "Reset request processed"
        );

        Ok(ProcessResetOutput {
            request_id: updated.id,
            status: updated.status,
            processed_at,
        })
    }
}
