//! Domain Entities
//!
//! Core business entities for the reset workflow.

use chrono::{DateTime, Utc};
use kernel::id::{ResetRequestId, UserId};

use crate::domain::value_objects::{Email, ResetStatus};

/// A user as seen by the external directory (`users` table).
///
/// Read-only here; account lifecycle belongs to the identity platform.
#[derive(Debug, Clone)]
pub struct DirectoryUser {
    pub user_id: UserId,
    pub user_name: String,
    pub email: Email,
}

/// ResetRequest entity - one credential-reset request end to end
///
/// Created on submit regardless of whether the email matched an account
/// (unmatched requests carry `user_id = None`), so responses never reveal
/// which emails are registered. Mutated exactly once, by process or reject.
#[derive(Debug, Clone)]
pub struct ResetRequest {
    pub id: ResetRequestId,
    pub user_id: Option<UserId>,
    pub user_email: Email,
    pub user_name: Option<String>,
    pub status: ResetStatus,
    pub processed_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl ResetRequest {
    /// Create a new pending request, linking the user only when matched.
    pub fn new(email: Email, matched: Option<&DirectoryUser>) -> Self {
        Self {
            id: ResetRequestId::new(),
            user_id: matched.map(|u| u.user_id),
            user_email: email,
            user_name: matched.map(|u| u.user_name.clone()),
            status: ResetStatus::Pending,
            processed_by: None,
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Whether the submitted email matched an active account.
    pub fn has_matched_user(&self) -> bool {
        self.user_id.is_some()
    }

    /// Apply the processed transition. The store-level conditional update is
    /// the authority; this mirrors it on the in-memory entity.
    pub fn mark_processed(&mut self, processed_by: UserId) {
        self.status = ResetStatus::Processed;
        self.processed_by = Some(processed_by);
        self.processed_at = Some(Utc::now());
    }

    /// Apply the rejected transition.
    pub fn mark_rejected(&mut self, processed_by: UserId) {
        self.status = ResetStatus::Rejected;
        self.processed_by = Some(processed_by);
        self.processed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    fn email() -> Email {
        Email::new("user@example.com").unwrap()
    }

    #[test]
    fn test_unmatched_request_has_no_user() {
        let request = ResetRequest::new(email(), None);

        assert!(request.is_pending());
        assert!(!request.has_matched_user());
        assert!(request.user_name.is_none());
        assert!(request.processed_by.is_none());
        assert!(request.processed_at.is_none());
    }

    #[test]
    fn test_matched_request_links_user() {
        let user = DirectoryUser {
            user_id: Id::new(),
            user_name: "sato.hanako".to_string(),
            email: email(),
        };
        let request = ResetRequest::new(email(), Some(&user));

        assert_eq!(request.user_id, Some(user.user_id));
        assert_eq!(request.user_name.as_deref(), Some("sato.hanako"));
        assert!(request.is_pending());
    }

    #[test]
    fn test_mark_processed() {
        let mut request = ResetRequest::new(email(), None);
        let admin: UserId = Id::new();

        request.mark_processed(admin);

        assert_eq!(request.status, ResetStatus::Processed);
        assert_eq!(request.processed_by, Some(admin));
        assert!(request.processed_at.is_some());
        assert!(!request.is_pending());
    }

    #[test]
    fn test_mark_rejected() {
        let mut request = ResetRequest::new(email(), None);
        let admin: UserId = Id::new();

        request.mark_rejected(admin);

        assert_eq!(request.status, ResetStatus::Rejected);
        assert_eq!(request.processed_by, Some(admin));
        assert!(request.processed_at.is_some());
    }
}
