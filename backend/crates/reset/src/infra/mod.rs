//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod identity;
pub mod notifier;
pub mod postgres;

pub use identity::HttpCredentialAuthority;
pub use notifier::TracingNotifier;
pub use postgres::PgResetRepository;
