//! Access Middleware
//!
//! HTTP integration for the policy engine. The external session collaborator
//! authenticates the caller and stores a [`Principal`] in request extensions;
//! everything here only reads it.

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::policy::{AccessRequirement, Decision, evaluate};
use crate::principal::Principal;

/// Middleware state
#[derive(Clone)]
pub struct AccessState {
    pub requirement: Arc<AccessRequirement>,
}

impl AccessState {
    pub fn new(requirement: AccessRequirement) -> Self {
        Self {
            requirement: Arc::new(requirement),
        }
    }
}

/// Middleware that evaluates the route's access requirement.
///
/// Denials map to 401 (unauthenticated) or 403 (role/scope) with the
/// decision's reason in the error envelope.
pub async fn require_access(
    state: AccessState,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let principal = req.extensions().get::<Principal>();

    let decision = evaluate(principal, &state.requirement);

    match decision {
        Decision::Allow => Ok(next.run(req).await),
        Decision::DenyUnauthenticated => {
            tracing::debug!("Unauthenticated request to protected route");
            Err(AppError::unauthorized(decision.reason()).into_response())
        }
        denied => {
            tracing::warn!(
                role = principal.map(|p| p.role.code()).unwrap_or("none"),
                reason = denied.reason(),
                "Access denied"
            );
            Err(AppError::forbidden(denied.reason()).into_response())
        }
    }
}

/// Extractor for handlers that need the caller's identity.
///
/// Rejects with 401 when the session collaborator supplied no principal.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| {
                AppError::unauthorized(Decision::DenyUnauthenticated.reason())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use kernel::id::Id;

    #[tokio::test]
    async fn test_authenticated_extractor_reads_extensions() {
        let principal = Principal::new(Id::new(), Role::Admin, Id::new(), Id::new());

        let request = Request::builder()
            .extension(principal.clone())
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let extracted = Authenticated::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted.0.role, Role::Admin);
        assert_eq!(extracted.0.user_id, principal.user_id);
    }

    #[tokio::test]
    async fn test_authenticated_extractor_rejects_without_principal() {
        let request = Request::builder().body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let rejection = Authenticated::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejection.status_code(), 401);
    }
}
