//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Rate limiting infrastructure (fixed-window governor, store, middleware)
//! - Client identifier resolution
//! - Cryptographic utilities (random tokens, Base64)

pub mod client;
pub mod crypto;
pub mod rate_limit;
