//! Handlers for user registration, sign-in, and listing.

use accounts_core::error::CoreError;
use accounts_core::types::DbId;
use accounts_db::models::user::User;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::directory::UserProfile;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Confirmation returned by a successful registration.
pub const USER_CREATED_MESSAGE: &str = "User created successfully.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/createUser`. Missing fields are reported as
/// validation errors rather than rejected by the JSON extractor. Bodies that
/// are not JSON objects of strings become a `Validation` error as well.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request body for `POST /api/request`.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Plain `{ "message": ... }` confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    #[serde(rename = "Token")]
    pub token: String,
}

/// Public view of a user. Password material is never included.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/createUser
///
/// Register a new user.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(input) = payload?;
    let profile = UserProfile {
        first_name: input.first_name,
        last_name: input.last_name,
        username: input.username,
    };
    state
        .directory
        .create(profile, input.password.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: USER_CREATED_MESSAGE.to_string(),
    }))
}

/// POST /api/request
///
/// Exchange a username and password for a bearer token. Unknown usernames
/// and wrong passwords produce the same response.
pub async fn request_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Json(input) = payload?;
    let outcome = state
        .sessions
        .authenticate(input.username.as_deref(), input.password.as_deref())
        .await;

    let user = match outcome {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!(reason = "password_mismatch", "Sign-in rejected");
            return Err(AppError::InvalidCredentials);
        }
        Err(AppError::Core(CoreError::NotFound { .. })) => {
            tracing::info!(reason = "unknown_user", "Sign-in rejected");
            return Err(AppError::InvalidCredentials);
        }
        Err(AppError::StoredCredential(err)) => {
            tracing::warn!(error = %err, reason = "stored_credential", "Sign-in rejected");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    let token = state.sessions.issue_token(user.id)?;
    tracing::info!(user_id = user.id, "Token issued");

    Ok(Json(TokenResponse { token }))
}

/// GET /api/usersList
///
/// List every registered user. Requires a bearer token.
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.directory.list_all().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// GET /api/users/{id}
///
/// Fetch a single user by id. Requires a bearer token.
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserSummary>> {
    let user = state
        .directory
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "User",
            key: id.to_string(),
        })?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_camel_case_without_password() {
        let summary = UserSummary {
            id: 3,
            username: "alice".into(),
            first_name: "A".into(),
            last_name: "L".into(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "username": "alice", "firstName": "A", "lastName": "L"})
        );
    }

    #[test]
    fn register_request_tolerates_missing_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"username": "bob"}"#).unwrap();
        assert_eq!(req.username.as_deref(), Some("bob"));
        assert!(req.password.is_none());
        assert!(req.first_name.is_none());
    }

    #[test]
    fn token_response_uses_capitalized_key() {
        let json = serde_json::to_value(TokenResponse { token: "t".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"Token": "t"}));
    }
}
