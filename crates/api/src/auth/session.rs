//! Credential verification and bearer-token issuance.

use std::sync::Arc;

use accounts_core::clock::Clock;
use accounts_core::credentials::verify_password_hash;
use accounts_core::error::CoreError;
use accounts_core::fields::{self, MSG_PASSWORD_REQUIRED, MSG_USERNAME_REQUIRED};
use accounts_core::types::DbId;
use accounts_db::models::user::User;

use crate::auth::jwt::{generate_token, validate_token, Claims, JwtConfig};
use crate::directory::UserDirectory;
use crate::error::{AppError, AppResult};

/// Verifies credentials against the directory and signs stateless tokens.
pub struct SessionIssuer {
    directory: UserDirectory,
    jwt: JwtConfig,
    clock: Arc<dyn Clock>,
}

impl SessionIssuer {
    pub fn new(directory: UserDirectory, jwt: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory,
            jwt,
            clock,
        }
    }

    /// Look up `username` and check `password` against the stored hash.
    ///
    /// - blank username or password: `CoreError::Validation`
    /// - unknown username: `CoreError::NotFound`
    /// - wrong password: `Ok(None)`
    /// - stored hash or salt of the wrong shape: `AppError::StoredCredential`
    ///
    /// Callers facing end users must not let the last two be told apart.
    pub async fn authenticate(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<Option<User>> {
        let username = fields::require(username, MSG_USERNAME_REQUIRED)?;
        let password = fields::require(password, MSG_PASSWORD_REQUIRED)?;

        let user = self
            .directory
            .find_by_username(username)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "User",
                key: username.to_string(),
            })?;

        let matches = verify_password_hash(password, &user.password_hash, &user.password_salt)
            .map_err(AppError::StoredCredential)?;

        Ok(matches.then_some(user))
    }

    /// Sign a token for `user_id` valid from now until now plus the
    /// configured lifetime.
    pub fn issue_token(&self, user_id: DbId) -> AppResult<String> {
        generate_token(user_id, self.clock.now(), &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
    }

    /// Validate a presented token and return its claims.
    pub fn decode_token(&self, token: &str) -> AppResult<Claims> {
        validate_token(token, &self.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })
    }
}
