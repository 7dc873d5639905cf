//! Persistence gateway for the `users` table.
//!
//! # Table
//!
//! ```sql
//! CREATE TABLE users (
//!     id   SERIAL PRIMARY KEY,
//!     name TEXT    NOT NULL,
//!     age  INTEGER NOT NULL
//! );
//! ```
//!
//! The schema is owned by the database administrator; this crate never
//! creates or migrates it.
//!
//! Every operation is one parameterized statement. Update and delete report
//! the affected-row count and leave "not found" to the caller, so there is no
//! existence check racing the mutation.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use roster_core::{User, UserDraft, UserId};

#[cfg(test)]
pub(crate) mod fake;
mod users;

pub use users::PgUserStore;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx (connection, constraint, or row decode).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Port for user persistence.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the ID the store assigned.
    async fn insert(&self, draft: &UserDraft) -> Result<UserId, RepositoryError>;

    /// All users in ascending ID order.
    async fn select_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// One user, or `None` when no row has this ID.
    async fn select_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Replace name and age; returns the number of rows affected.
    async fn update_by_id(&self, id: UserId, draft: &UserDraft) -> Result<u64, RepositoryError>;

    /// Remove the row; returns the number of rows affected.
    async fn delete_by_id(&self, id: UserId) -> Result<u64, RepositoryError>;

    /// Round-trip to the store, used by the readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
