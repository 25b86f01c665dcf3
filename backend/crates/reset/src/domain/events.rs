//! Domain Events
//!
//! Emitted by the workflow on state changes and consumed by external
//! collaborators. The submit notification is an explicit event here instead
//! of a database trigger, so the workflow's success contract stays
//! independent of store mechanics.

use chrono::{DateTime, Utc};
use kernel::id::ResetRequestId;

use crate::domain::entities::ResetRequest;

/// A reset request was persisted and awaits administrator review.
#[derive(Debug, Clone)]
pub struct ResetRequestSubmitted {
    pub request_id: ResetRequestId,
    pub user_email: String,
    pub matched_user: bool,
    pub created_at: DateTime<Utc>,
}

impl ResetRequestSubmitted {
    pub fn from_request(request: &ResetRequest) -> Self {
        Self {
            request_id: request.id,
            user_email: request.user_email.as_str().to_string(),
            matched_user: request.has_matched_user(),
            created_at: request.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Email;

    #[test]
    fn test_event_mirrors_request() {
        let request = ResetRequest::new(Email::new("user@example.com").unwrap(), None);
        let event = ResetRequestSubmitted::from_request(&request);

        assert_eq!(event.request_id, request.id);
        assert_eq!(event.user_email, "user@example.com");
        assert!(!event.matched_user);
        assert_eq!(event.created_at, request.created_at);
    }
}
