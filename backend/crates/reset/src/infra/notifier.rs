//! Notifier Implementations
//!
//! Default administrator-notification collaborator. Deployments that page
//! admins through chat or email plug their own [`Notifier`] here.

use crate::domain::events::ResetRequestSubmitted;
use crate::domain::repository::Notifier;

/// Notifier that records submissions on the structured log stream
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    async fn notify(&self, event: &ResetRequestSubmitted) {
        tracing::info!(
            request_id = %event.request_id,
            created_at = %event.created_at,
            "Reset request awaiting administrator review"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResetRequest;
    use crate::domain::value_objects::Email;

    #[tokio::test]
    async fn test_tracing_notifier_accepts_events() {
        let request = ResetRequest::new(Email::new("user@example.com").unwrap(), None);
        let event = ResetRequestSubmitted::from_request(&request);

        TracingNotifier.notify(&event).await;
    }
}
