//! Submit Reset Request Use Case
//!
//! Anonymous entry point of the workflow. Creates a pending request whether
//! or not the email matched an account, so the response never reveals which
//! emails are registered.

use platform::rate_limit::{RateLimitConfig, RateLimitStore};
use std::sync::Arc;

use crate::application::config::ResetConfig;
use crate::domain::entities::ResetRequest;
use crate::domain::events::ResetRequestSubmitted;
use crate::domain::repository::{Notifier, ResetRequestRepository, UserDirectory};
use crate::domain::value_objects::Email;
use crate::error::{ResetError, ResetResult};
use kernel::id::ResetRequestId;

/// Input DTO for submit
#[derive(Debug, Clone)]
pub struct SubmitResetInput {
    /// Already validated and normalized by the caller
    pub email: Email,
    /// Rate-window identifier for the caller
    pub identifier: String,
}

/// Output DTO for submit
#[derive(Debug, Clone)]
pub struct SubmitResetOutput {
    pub request_id: ResetRequestId,
}

/// Submit Reset Request Use Case
pub struct SubmitResetUseCase<R, D, N, G>
where
    R: ResetRequestRepository,
    D: UserDirectory,
    N: Notifier,
    G: RateLimitStore,
{
    request_repo: Arc<R>,
    directory: Arc<D>,
    notifier: Arc<N>,
    governor: Arc<G>,
    config: Arc<ResetConfig>,
}

impl<R, D, N, G> SubmitResetUseCase<R, D, N, G>
where
    R: ResetRequestRepository,
    D: UserDirectory,
    N: Notifier,
    G: RateLimitStore,
{
    pub fn new(
        request_repo: Arc<R>,
        directory: Arc<D>,
        notifier: Arc<N>,
        governor: Arc<G>,
        config: Arc<ResetConfig>,
    ) -> Self {
        Self {
            request_repo,
            directory,
            notifier,
            governor,
            config,
        }
    }

    pub async fn execute(&self, input: SubmitResetInput) -> ResetResult<SubmitResetOutput> {
        // Strict profile; validation already happened, so invalid submissions
        // never consume the caller's window.
        let limit: &RateLimitConfig = &self.config.submit_limit;
        let result = self
            .governor
            .check_and_increment(&input.identifier, limit)
            .await
            .map_err(|e| ResetError::Internal(e.to_string()))?;

        if !result.allowed {
            return Err(ResetError::RateLimited {
                limit: limit.max_requests,
                reset_at_ms: result.reset_at_ms,
            });
        }

        let matched = self.directory.find_active_by_email(&input.email).await?;

        let request = ResetRequest::new(input.email, matched.as_ref());
        self.request_repo.create(&request).await?;

        // Insert succeeded; hand the event to the notification collaborator.
        let event = ResetRequestSubmitted::from_request(&request);
        self.notifier.notify(&event).await;

        tracing::info!(request_id = %request.id, "Reset request submitted");

        Ok(SubmitResetOutput {
            request_id: request.id,
        })
    }
}
