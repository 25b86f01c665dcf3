//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (ResetRequest, DirectoryUser)
//! - Domain value objects (Email, ResetStatus)
//! - Domain events (ResetRequestSubmitted)
//! - Repository and collaborator traits (interfaces)

pub mod entities;
pub mod events;
pub mod repository;
pub mod value_objects;
