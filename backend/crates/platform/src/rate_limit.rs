//! Rate Limiting Infrastructure
//!
//! Fixed-window request governor protecting abuse-prone endpoints.
//!
//! The governor is profile-agnostic: callers supply the limit and window.
//! Counters live in an injected store behind [`RateLimitStore`], so the same
//! logic can target the in-process map or a shared external cache without
//! changing callers.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::body::Body;
use axum::http::{HeaderName, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;

use crate::client::resolve_identifier;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Counter record for one identifier's current window.
///
/// Created on the first request for an identifier, replaced in place when the
/// window rolls over, removed by the periodic sweep once expired.
#[derive(Debug, Clone)]
struct RateRecord {
    count: u32,
    window_reset_at_ms: i64,
}

/// Trait for rate limit storage backends
///
/// Implementations MUST perform the read and the increment as one indivisible
/// step per key. A store that reads the current count and writes the
/// incremented count as two separate operations under-counts requests past
/// the limit under parallel load.
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment the counter for `key` under `config`.
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// Current time as epoch milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// In-process counter store backed by a sharded concurrent map.
///
/// The entry API gives per-key exclusive access, so the read-increment-write
/// sequence is atomic per identifier. No await happens while an entry is
/// held. Memory is bounded to the number of active windows by
/// [`MemoryRateLimitStore::sweep_expired`].
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    records: DashMap<String, RateRecord>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Fixed-window check: opens a new window (count = 1) on the first
    /// request or after expiry; otherwise increments. At the limit the call
    /// is denied without incrementing and keeps the existing reset time.
    pub fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        let now = now_ms();
        let window_ms = config.window_ms();

        let mut entry = self
            .records
            .entry(key.to_string())
            .or_insert_with(|| RateRecord {
                count: 0,
                window_reset_at_ms: now + window_ms,
            });
        let record = entry.value_mut();

        if now >= record.window_reset_at_ms {
            // Window rollover: counter restarts at 1, not 0.
            record.count = 1;
            record.window_reset_at_ms = now + window_ms;
            return RateLimitResult {
                allowed: true,
                remaining: config.max_requests.saturating_sub(1),
                reset_at_ms: record.window_reset_at_ms,
            };
        }

        if record.count >= config.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms: record.window_reset_at_ms,
            };
        }

        record.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: config.max_requests.saturating_sub(record.count),
            reset_at_ms: record.window_reset_at_ms,
        }
    }

    /// Remove every record whose window has already passed.
    ///
    /// Runs shard by shard; concurrent checks are never all blocked behind
    /// one full-map scan.
    pub fn sweep_expired(&self) -> usize {
        let now = now_ms();
        let before = self.records.len();
        self.records.retain(|_, record| record.window_reset_at_ms > now);
        before.saturating_sub(self.records.len())
    }

    /// Number of identifiers with a live window
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check(key, config))
    }
}

/// Periodic eviction loop, independent of request traffic.
///
/// Spawn once at startup; runs until the process exits.
pub async fn run_sweep_loop(store: Arc<MemoryRateLimitStore>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let removed = store.sweep_expired();
        if removed > 0 {
            tracing::debug!(removed, live = store.len(), "Swept expired rate windows");
        }
    }
}

// ============================================================================
// HTTP composition
// ============================================================================

/// Middleware state
#[derive(Clone)]
pub struct RateLimitState {
    pub store: Arc<MemoryRateLimitStore>,
    pub config: RateLimitConfig,
}

/// Middleware enforcing a rate profile on the wrapped routes.
///
/// On allow the request proceeds unmodified. On denial it responds with the
/// fixed 429 shape from [`rate_limit_response`].
pub async fn require_rate_limit(
    state: RateLimitState,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let direct_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let identifier = resolve_identifier(req.headers(), direct_ip);

    let result = state.store.check(&identifier, &state.config);

    if !result.allowed {
        tracing::warn!(
            identifier = %identifier,
            limit = state.config.max_requests,
            "Rate limit exceeded"
        );
        return Err(rate_limit_response(
            state.config.max_requests,
            result.reset_at_ms,
        ));
    }

    Ok(next.run(req).await)
}

/// Fixed denial shape shared by the middleware and in-handler governors:
/// 429 with `Retry-After` plus rate-limit telemetry headers.
pub fn rate_limit_response(limit: u32, reset_at_ms: i64) -> Response {
    let retry_after_secs = ((reset_at_ms - now_ms()).max(0) + 999) / 1000;
    let reset_epoch_secs = reset_at_ms / 1000;

    let body = serde_json::json!({
        "error": "Too Many Requests",
        "message": "Rate limit exceeded. Try again later.",
        "code": "TOO_MANY_REQUESTS",
        "retryAfter": retry_after_secs,
    });

    (
        StatusCode::TOO_MANY_REQUESTS,
        [
            (header::RETRY_AFTER, retry_after_secs.to_string()),
            (
                HeaderName::from_static("x-ratelimit-limit"),
                limit.to_string(),
            ),
            (
                HeaderName::from_static("x-ratelimit-remaining"),
                "0".to_string(),
            ),
            (
                HeaderName::from_static("x-ratelimit-reset"),
                reset_epoch_secs.to_string(),
            ),
        ],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_counts_down_then_denies() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(5, 900);

        for expected_remaining in [4, 3, 2, 1, 0] {
            let result = store.check("ip-1", &config);
            assert!(result.allowed);
            assert_eq!(result.remaining, expected_remaining);
        }

        let result = store.check("ip-1", &config);
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[test]
    fn test_denial_keeps_reset_time_and_count() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(2, 900);

        store.check("ip-1", &config);
        let at_limit = store.check("ip-1", &config);

        let denied = store.check("ip-1", &config);
        assert!(!denied.allowed);
        // Denied calls do not increment and do not move the window.
        assert_eq!(denied.reset_at_ms, at_limit.reset_at_ms);

        let denied_again = store.check("ip-1", &config);
        assert_eq!(denied_again.reset_at_ms, at_limit.reset_at_ms);
    }

    #[test]
    fn test_identifiers_are_independent() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 900);

        assert!(store.check("ip-1", &config).allowed);
        assert!(!store.check("ip-1", &config).allowed);
        assert!(store.check("ip-2", &config).allowed);
    }

    #[test]
    fn test_window_rollover_resets_to_one() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig {
            max_requests: 2,
            window: Duration::from_millis(10),
        };

        assert!(store.check("ip-1", &config).allowed);
        assert!(store.check("ip-1", &config).allowed);
        assert!(!store.check("ip-1", &config).allowed);

        std::thread::sleep(Duration::from_millis(20));

        let result = store.check("ip-1", &config);
        assert!(result.allowed);
        // Counter restarted at 1, so one more request fits.
        assert_eq!(result.remaining, 1);
    }

    #[test]
    fn test_sweep_removes_only_expired_windows() {
        let store = MemoryRateLimitStore::new();
        let short = RateLimitConfig {
            max_requests: 5,
            window: Duration::from_millis(10),
        };
        let long = RateLimitConfig::new(5, 900);

        store.check("short-lived", &short);
        store.check("long-lived", &long);
        assert_eq!(store.len(), 2);

        std::thread::sleep(Duration::from_millis(20));

        let removed = store.sweep_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sweep_on_empty_store() {
        let store = MemoryRateLimitStore::new();
        assert_eq!(store.sweep_expired(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_trait_matches_sync_check() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 60);

        let result = RateLimitStore::check_and_increment(&store, "ip-1", &config)
            .await
            .unwrap();
        assert!(result.allowed);
        assert_eq!(result.remaining, 2);
    }

    #[test]
    fn test_rate_limit_response_shape() {
        let response = rate_limit_response(5, now_ms() + 60_000);

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let headers = response.headers();
        assert!(headers.contains_key(header::RETRY_AFTER));
        assert_eq!(headers.get("x-ratelimit-limit").unwrap(), "5");
        assert_eq!(headers.get("x-ratelimit-remaining").unwrap(), "0");
        assert!(headers.contains_key("x-ratelimit-reset"));
    }
}
