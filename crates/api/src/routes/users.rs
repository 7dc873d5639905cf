//! User route handlers.
//!
//! Each handler parses its input, makes exactly one store call, maps the
//! outcome to a response, and logs the outcome with the request ID.

use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::Serialize;

use roster_core::{IdParseError, User, UserDraft, UserId};

use crate::db::RepositoryError;
use crate::error::{ApiError, Result};
use crate::middleware::RequestId;
use crate::response::PrettyJson;
use crate::state::AppState;

const INVALID_JSON: &str = "Invalid JSON";
const INVALID_ID: &str = "Invalid user id";
const USER_NOT_FOUND: &str = "User not found";

/// Build the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/users", get(list_users))
        .route(
            "/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Confirmation body for create and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

// =============================================================================
// Input and outcome helpers
// =============================================================================

fn parse_id(raw: &str, request_id: RequestId) -> Result<UserId> {
    raw.parse::<UserId>().map_err(|err: IdParseError| {
        tracing::warn!(%request_id, input = %err.input, "Invalid user id (not an integer)");
        ApiError::BadRequest(INVALID_ID.to_string())
    })
}

fn decode_body(
    body: JsonBody<UserDraft>,
    request_id: RequestId,
    operation: &'static str,
) -> Result<UserDraft> {
    body.map(|Json(draft)| draft).map_err(|rejection| {
        tracing::warn!(
            %request_id,
            operation,
            reason = %rejection.body_text(),
            "Invalid JSON in request body"
        );
        ApiError::BadRequest(INVALID_JSON.to_string())
    })
}

fn store_failure(
    request_id: RequestId,
    operation: &'static str,
    err: &RepositoryError,
) -> ApiError {
    tracing::error!(%request_id, operation, error = %err, "Store operation failed");
    ApiError::Internal
}

fn not_found(request_id: RequestId, id: UserId) -> ApiError {
    tracing::warn!(%request_id, user_id = %id, "User not found");
    ApiError::NotFound(USER_NOT_FOUND.to_string())
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a user.
///
/// POST /user
async fn create_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: JsonBody<UserDraft>,
) -> Result<Json<MessageResponse>> {
    let draft = decode_body(body, request_id, "create")?;

    let id = state
        .store()
        .insert(&draft)
        .await
        .map_err(|e| store_failure(request_id, "insert", &e))?;

    tracing::info!(
        %request_id,
        user_id = %id,
        name = %draft.name,
        age = draft.age,
        "User created"
    );

    Ok(Json(MessageResponse {
        message: format!("Name: {}. Age: {}. ID: {id}", draft.name, draft.age),
    }))
}

/// List all users in ascending ID order.
///
/// GET /users
async fn list_users(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<PrettyJson<Vec<User>>> {
    let users = state
        .store()
        .select_all()
        .await
        .map_err(|e| store_failure(request_id, "select_all", &e))?;

    tracing::info!(%request_id, count = users.len(), "Listed all users");

    Ok(PrettyJson(users))
}

/// Fetch one user.
///
/// GET /user/:id
async fn get_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>> {
    let id = parse_id(&raw_id, request_id)?;

    let user = state
        .store()
        .select_by_id(id)
        .await
        .map_err(|e| store_failure(request_id, "select_by_id", &e))?
        .ok_or_else(|| not_found(request_id, id))?;

    tracing::info!(%request_id, user_id = %id, "User fetched");

    Ok(Json(user))
}

/// Replace a user's name and age.
///
/// PUT /user/:id
async fn update_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(raw_id): Path<String>,
    body: JsonBody<UserDraft>,
) -> Result<Json<User>> {
    let id = parse_id(&raw_id, request_id)?;
    let draft = decode_body(body, request_id, "update")?;

    let affected = state
        .store()
        .update_by_id(id, &draft)
        .await
        .map_err(|e| store_failure(request_id, "update_by_id", &e))?;

    if affected == 0 {
        return Err(not_found(request_id, id));
    }

    tracing::info!(
        %request_id,
        user_id = %id,
        name = %draft.name,
        age = draft.age,
        "User updated"
    );

    Ok(Json(draft.with_id(id)))
}

/// Delete a user.
///
/// DELETE /user/:id
async fn delete_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&raw_id, request_id)?;

    let affected = state
        .store()
        .delete_by_id(id)
        .await
        .map_err(|e| store_failure(request_id, "delete_by_id", &e))?;

    if affected == 0 {
        return Err(not_found(request_id, id));
    }

    tracing::info!(%request_id, user_id = %id, "User deleted");

    Ok(Json(MessageResponse {
        message: format!("User {id} deleted"),
    }))
}
