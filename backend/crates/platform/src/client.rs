//! Client identification utilities
//!
//! Resolves the identifier that keys a caller's rate window.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Shared bucket for requests with no resolvable address.
///
/// Known weakness: every such caller shares one global window, so a single
/// misconfigured proxy can exhaust the bucket for all of them. Kept explicit
/// rather than silently widening the limit.
pub const UNKNOWN_IDENTIFIER: &str = "unknown";

/// Extract client IP address from headers
///
/// Checks the X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to the direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // First IP in the X-Forwarded-For list is the originating client.
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

/// Resolve the rate-window identifier for a request.
///
/// Forwarded-for chain first, then the direct connection address, then the
/// [`UNKNOWN_IDENTIFIER`] bucket.
pub fn resolve_identifier(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> String {
    extract_client_ip(headers, direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_IDENTIFIER.to_string())
}
