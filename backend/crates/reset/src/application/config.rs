//! Application Configuration
//!
//! Configuration for the reset workflow. The governor itself is
//! profile-agnostic; both rate profiles live here with their callers.

use platform::rate_limit::RateLimitConfig;

/// Reset workflow configuration
#[derive(Debug, Clone)]
pub struct ResetConfig {
    /// Strict profile for anonymous credential-recovery initiation
    pub submit_limit: RateLimitConfig,
    /// Loose profile for authenticated administrative endpoints
    pub admin_limit: RateLimitConfig,
    /// Random bytes in a generated temporary credential
    pub temp_credential_bytes: usize,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            // 5 requests / 15 minutes
            submit_limit: RateLimitConfig::new(5, 15 * 60),
            // 10 requests / 1 minute
            admin_limit: RateLimitConfig::new(10, 60),
            temp_credential_bytes: 24,
        }
    }
}
