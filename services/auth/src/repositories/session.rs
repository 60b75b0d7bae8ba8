//! Session repository for database operations

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use super::SessionRepository;
use crate::{context::RequestContext, error::RepositoryError, models::Session};

/// Session repository backed by the `sessions` table
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn get_session_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Session, RepositoryError> {
        debug!("Finding session by ID: {}", id);

        let row = ctx
            .run(async {
                sqlx::query(
                    r#"
                    SELECT id, user_id, expires_at, created_at
                    FROM sessions
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(RepositoryError::from)
            })
            .await?;

        let row = row.ok_or(RepositoryError::NotFound)?;

        Ok(Session {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            expires_at: row.try_get("expires_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
