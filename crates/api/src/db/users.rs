//! `PostgreSQL` implementation of [`UserStore`].
//!
//! Queries are checked at runtime (`sqlx::query_as::<_, T>`) so the crate
//! builds without a live database.

use async_trait::async_trait;
use sqlx::PgPool;

use roster_core::{User, UserDraft, UserId};

use super::{RepositoryError, UserStore};

/// User store backed by a shared connection pool.
///
/// Cloning is cheap; every clone uses the same pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, draft: &UserDraft) -> Result<UserId, RepositoryError> {
        let id = sqlx::query_scalar::<_, UserId>(
            r"
            INSERT INTO users (name, age)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(&draft.name)
        .bind(draft.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn select_all(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, age
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn select_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, age
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_by_id(&self, id: UserId, draft: &UserDraft) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = $1, age = $2
            WHERE id = $3
            ",
        )
        .bind(&draft.name)
        .bind(draft.age)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
