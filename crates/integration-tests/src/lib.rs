//! Integration tests for Roster.
//!
//! # Running Tests
//!
//! ```bash
//! # Point at a disposable PostgreSQL database
//! export ROSTER_TEST_DATABASE_URL=postgres://localhost/roster_test
//!
//! # Run the ignored end-to-end tests
//! cargo test -p roster-integration-tests -- --ignored
//! ```
//!
//! Each test starts its own server on an ephemeral port against the shared
//! database, so tests only make assertions about rows they created.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use secrecy::SecretString;
use sqlx::PgPool;
use tokio::net::TcpListener;

use roster_api::config::ApiConfig;
use roster_api::db::{self, PgUserStore};
use roster_api::state::AppState;
use roster_core::UserId;

/// Table the service expects. Created here only so a blank test database works.
const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id   SERIAL PRIMARY KEY,
        name TEXT    NOT NULL,
        age  INTEGER NOT NULL
    )
";

/// Database URL for integration tests (configurable via environment).
fn test_database_url() -> String {
    std::env::var("ROSTER_TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/roster_test".to_string())
}

/// A running server backed by the test database.
pub struct TestServer {
    pub client: Client,
    pub pool: PgPool,
    addr: SocketAddr,
}

impl TestServer {
    /// Connect to the test database and serve the app on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the database is unreachable or the listener cannot bind.
    pub async fn start() -> Self {
        let database_url = SecretString::from(test_database_url());
        let pool = db::create_pool(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        sqlx::query(CREATE_USERS_TABLE)
            .execute(&pool)
            .await
            .expect("Failed to ensure users table");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let config = ApiConfig {
            database_url,
            host: addr.ip(),
            port: addr.port(),
            log_file: PathBuf::from("log.txt"),
            db_max_connections: 5,
            request_timeout: Duration::from_secs(30),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = AppState::new(config, Arc::new(PgUserStore::new(pool.clone())));

        tokio::spawn(async move {
            axum::serve(listener, roster_api::app(state))
                .await
                .expect("Test server error");
        });

        Self {
            client: Client::new(),
            pool,
            addr,
        }
    }

    /// Absolute URL for a request path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// An ID no row currently has.
    ///
    /// # Panics
    ///
    /// Panics if the query fails.
    pub async fn unused_id(&self) -> UserId {
        let max: Option<i32> = sqlx::query_scalar("SELECT MAX(id) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to read max id");
        UserId::new(max.unwrap_or(0) + 1_000_000)
    }
}

/// Extract the ID from a create confirmation (`"... ID: 7"`).
#[must_use]
pub fn id_from_message(body: &serde_json::Value) -> Option<UserId> {
    body["message"].as_str()?.rsplit("ID: ").next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_message() {
        let body = serde_json::json!({"message": "Name: Ann. Age: 30. ID: 12"});
        assert_eq!(id_from_message(&body), Some(UserId::new(12)));
        assert_eq!(id_from_message(&serde_json::json!({"error": "x"})), None);
    }
}
