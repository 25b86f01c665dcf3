//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{DirectoryUser, ResetRequest};
use crate::domain::repository::{ResetRequestRepository, UserDirectory};
use crate::domain::value_objects::{Email, ResetStatus};
use crate::error::{ResetError, ResetResult};
use kernel::id::{Id, ResetRequestId, UserId};

/// PostgreSQL-backed reset repository
#[derive(Clone)]
pub struct PgResetRepository {
    pool: PgPool,
}

impl PgResetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ResetRequestRepository for PgResetRepository {
    async fn create(&self, request: &ResetRequest) -> ResetResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reset_requests (
                reset_request_id,
                user_id,
                user_email,
                user_name,
                status,
                processed_by,
                created_at,
                processed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.user_id.map(|id| id.into_uuid()))
        .bind(request.user_email.as_str())
        .bind(&request.user_name)
        .bind(request.status.id())
        .bind(request.processed_by.map(|id| id.into_uuid()))
        .bind(request.created_at)
        .bind(request.processed_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(request_id = %request.id, "Reset request created");

        Ok(())
    }

    async fn find_by_id(&self, request_id: ResetRequestId) -> ResetResult<Option<ResetRequest>> {
        let row = sqlx::query_as::<_, ResetRequestRow>(
            r#"
            SELECT
                reset_request_id,
                user_id,
                user_email,
                user_name,
                status,
                processed_by,
                created_at,
                processed_at
            FROM reset_requests
            WHERE reset_request_id = $1
            "#,
        )
        .bind(request_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_request()).transpose()
    }

    async fn complete(
        &self,
        request_id: ResetRequestId,
        status: ResetStatus,
        processed_by: UserId,
    ) -> ResetResult<Option<ResetRequest>> {
        // Single conditional write: only a pending row transitions, so two
        // concurrent processors cannot both succeed.
        let row = sqlx::query_as::<_, ResetRequestRow>(
            r#"
            UPDATE reset_requests
            SET status = $2, processed_by = $3, processed_at = NOW()
            WHERE reset_request_id = $1 AND status = $4
            RETURNING
                reset_request_id,
                user_id,
                user_email,
                user_name,
                status,
                processed_by,
                created_at,
                processed_at
            "#,
        )
        .bind(request_id.as_uuid())
        .bind(status.id())
        .bind(processed_by.into_uuid())
        .bind(ResetStatus::Pending.id())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                tracing::info!(
                    request_id = %request_id,
                    status = %status,
                    "Reset request completed"
                );
                r.into_request().map(Some)
            }
            None => Ok(None),
        }
    }
}

impl UserDirectory for PgResetRepository {
    async fn find_active_by_email(&self, email: &Email) -> ResetResult<Option<DirectoryUser>> {
        let row = sqlx::query_as::<_, DirectoryUserRow>(
            r#"
            SELECT user_id, user_name, email
            FROM users
            WHERE email = $1 AND is_active = TRUE
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_directory_user()))
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct ResetRequestRow {
    reset_request_id: Uuid,
    user_id: Option<Uuid>,
    user_email: String,
    user_name: Option<String>,
    status: i16,
    processed_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl ResetRequestRow {
    fn into_request(self) -> ResetResult<ResetRequest> {
        let status = ResetStatus::from_id(self.status).ok_or_else(|| {
            ResetError::Internal(format!("Invalid reset status id: {}", self.status))
        })?;

        Ok(ResetRequest {
            id: Id::from_uuid(self.reset_request_id),
            user_id: self.user_id.map(Id::from_uuid),
            user_email: Email::from_db(self.user_email),
            user_name: self.user_name,
            status,
            processed_by: self.processed_by.map(Id::from_uuid),
            created_at: self.created_at,
            processed_at: self.processed_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DirectoryUserRow {
    user_id: Uuid,
    user_name: String,
    email: String,
}

impl DirectoryUserRow {
    fn into_directory_user(self) -> DirectoryUser {
        DirectoryUser {
            user_id: Id::from_uuid(self.user_id),
            user_name: self.user_name,
            email: Email::from_db(self.email),
        }
    }
}
