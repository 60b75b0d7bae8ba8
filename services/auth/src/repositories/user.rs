//! User repository for database operations

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use super::UserRepository;
use crate::{
    context::RequestContext,
    error::RepositoryError,
    models::{User, UserId},
};

/// User repository backed by the `users` table
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_user_by_id(
        &self,
        ctx: &RequestContext,
        id: &UserId,
    ) -> Result<User, RepositoryError> {
        debug!("Finding user by ID: {}", id);

        let row = ctx
            .run(async {
                sqlx::query(
                    r#"
                    SELECT id, email, name, created_at, updated_at
                    FROM users
                    WHERE id = $1
                    "#,
                )
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(RepositoryError::from)
            })
            .await?;

        match row {
            Some(row) => Ok(User {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            }),
            None => Err(RepositoryError::NotFound),
        }
    }
}
