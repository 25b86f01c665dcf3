//! Repository Traits
//!
//! Interfaces for data persistence and external collaborators.
//! Implementations are in the infrastructure layer.

use kernel::id::{ResetRequestId, UserId};

use crate::domain::entities::{DirectoryUser, ResetRequest};
use crate::domain::events::ResetRequestSubmitted;
use crate::domain::value_objects::{Email, ResetStatus};
use crate::error::ResetResult;

/// Reset request repository trait
#[trait_variant::make(ResetRequestRepository: Send)]
pub trait LocalResetRequestRepository {
    /// Persist a new pending request
    async fn create(&self, request: &ResetRequest) -> ResetResult<()>;

    /// Fetch a request by ID
    async fn find_by_id(&self, request_id: ResetRequestId) -> ResetResult<Option<ResetRequest>>;

    /// Transition a pending request to a terminal status, atomically.
    ///
    /// The update is conditional on `status = pending` in a single write, so
    /// two concurrent calls cannot both succeed. Returns the updated request,
    /// or `None` when the request was no longer pending.
    async fn complete(
        &self,
        request_id: ResetRequestId,
        status: ResetStatus,
        processed_by: UserId,
    ) -> ResetResult<Option<ResetRequest>>;
}

/// Read-only view of the user directory
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Look up an active user by normalized email
    async fn find_active_by_email(&self, email: &Email) -> ResetResult<Option<DirectoryUser>>;
}

/// External identity provider rotating credentials
#[trait_variant::make(CredentialAuthority: Send)]
pub trait LocalCredentialAuthority {
    /// Replace the user's credential with a freshly generated one
    async fn update_credential(&self, user_id: UserId, new_credential: &str) -> ResetResult<()>;
}

/// Administrator notification collaborator
///
/// Delivery is the collaborator's concern; the workflow only guarantees the
/// event is emitted after a successful insert.
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    async fn notify(&self, event: &ResetRequestSubmitted);
}
