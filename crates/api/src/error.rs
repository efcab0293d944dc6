use accounts_core::credentials::CredentialError;
use accounts_core::error::CoreError;
use accounts_core::fields::username_taken_message;
use accounts_db::store::StoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Message shown for every failed sign-in, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "message": ... }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `accounts_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Sign-in failed. Unknown usernames and wrong passwords both end here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The stored hash or salt of an existing user could not be checked.
    ///
    /// Only raised after a successful username lookup, so the response body
    /// is the generic sign-in failure.
    #[error("Stored credential rejected: {0}")]
    StoredCredential(#[source] CredentialError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(username) => {
                AppError::Core(CoreError::Validation(username_taken_message(&username)))
            }
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found."))
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            },

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }

            // --- HTTP-specific errors ---
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                INVALID_CREDENTIALS_MESSAGE.to_string(),
            ),
            AppError::StoredCredential(err) => {
                tracing::warn!(error = %err, "Stored credential failed verification checks");
                (
                    StatusCode::BAD_REQUEST,
                    INVALID_CREDENTIALS_MESSAGE.to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(json!({ "message": message }))).into_response()
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "An internal error occurred".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn message_of(err: AppError) -> String {
        let bytes = err
            .into_response()
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["message"].as_str().unwrap().to_string()
    }

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(CoreError::Validation("Enter a username.".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                CoreError::NotFound {
                    entity: "User",
                    key: "7".into()
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::Unauthorized("no token".into()).into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::InvalidCredentials), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unexpected_errors_are_opaque() {
        assert_eq!(
            status_of(AppError::InternalError("token signing exploded".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(sqlx::Error::PoolTimedOut.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn stored_credential_error_hides_details() {
        let err = AppError::StoredCredential(CredentialError::InvalidArgument(
            "Invalid password hash length (expected 64 bytes, got 10).".into(),
        ));
        assert_eq!(message_of(err).await, INVALID_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn duplicate_username_becomes_validation() {
        let err: AppError = StoreError::DuplicateUsername("alice".into()).into();
        match err {
            AppError::Core(CoreError::Validation(msg)) => assert!(msg.contains("alice")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
