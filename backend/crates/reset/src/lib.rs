//! Reset - Credential-Reset Workflow
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations and external collaborators
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Workflow Model
//! - submit: anonymous, strict rate profile, creates a pending request
//!   whether or not the email matched (no account enumeration)
//! - process: administrator-only, rotates the credential via the external
//!   identity provider, transitions pending -> processed exactly once
//! - reject: administrator-only, transitions pending -> rejected
//!
//! ## Consistency Model
//! - Status transitions are a single conditional write; a repeat surfaces
//!   as a conflict, never a silent re-apply
//! - Identity-provider failures leave the request pending and retryable
//! - Administrator notification is an explicit domain event handed to a
//!   notifier collaborator, not a database trigger

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ResetConfig;
pub use error::{ResetError, ResetResult};
pub use infra::postgres::PgResetRepository;
pub use presentation::router::reset_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgResetRepository as ResetStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
