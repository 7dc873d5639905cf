//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health         - Liveness check
//! GET    /health/ready   - Readiness check (store round trip)
//!
//! # Users
//! POST   /user           - Create a user
//! GET    /users          - List all users, ordered by id
//! GET    /user/{id}      - Fetch one user
//! PUT    /user/{id}      - Replace name and age
//! DELETE /user/{id}      - Delete a user
//! ```

pub mod health;
pub mod users;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(users::router())
}
