//! Reset Router

use access::{AccessRequirement, AccessState, require_access};
use axum::{Router, middleware::from_fn, routing::post};
use platform::rate_limit::{MemoryRateLimitStore, RateLimitState, require_rate_limit};
use std::sync::Arc;

use crate::application::config::ResetConfig;
use crate::domain::repository::{
    CredentialAuthority, Notifier, ResetRequestRepository, UserDirectory,
};
use crate::infra::{HttpCredentialAuthority, PgResetRepository, TracingNotifier};
use crate::presentation::handlers::{self, ResetAppState};

/// Create the reset router with the PostgreSQL repository and the default
/// collaborators.
pub fn reset_router(
    repo: PgResetRepository,
    authority: HttpCredentialAuthority,
    governor: Arc<MemoryRateLimitStore>,
    config: ResetConfig,
) -> Router {
    reset_router_generic(repo, authority, TracingNotifier, governor, config)
}

/// Create a generic reset router for any repository/collaborator set
pub fn reset_router_generic<R, C, N>(
    repo: R,
    authority: C,
    notifier: N,
    governor: Arc<MemoryRateLimitStore>,
    config: ResetConfig,
) -> Router
where
    R: ResetRequestRepository + UserDirectory + Clone + Send + Sync + 'static,
    C: CredentialAuthority + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let admin_rate = RateLimitState {
        store: governor.clone(),
        config: config.admin_limit.clone(),
    };
    let admin_access = AccessState::new(AccessRequirement::admin());

    let state = ResetAppState {
        repo: Arc::new(repo),
        authority: Arc::new(authority),
        notifier: Arc::new(notifier),
        governor,
        config: Arc::new(config),
    };

    // Administrative transitions sit behind the loose rate profile and the
    // admin role requirement. Layers run outermost-last, so the governor is
    // added after the access check to run before it.
    let admin_routes = Router::new()
        .route("/reset-password", post(handlers::reset_password::<R, C, N>))
        .route(
            "/reject-password",
            post(handlers::reject_password::<R, C, N>),
        )
        .route_layer(from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let state = admin_access.clone();
                async move { require_access(state, req, next).await }
            },
        ))
        .route_layer(from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let state = admin_rate.clone();
                async move { require_rate_limit(state, req, next).await }
            },
        ));

    // Anonymous submission validates before its strict profile is consulted,
    // so the governor for this route lives inside the use case.
    Router::new()
        .route(
            "/forgot-password",
            post(handlers::forgot_password::<R, C, N>),
        )
        .merge(admin_routes)
        .with_state(state)
}
