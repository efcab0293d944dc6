//! The user directory: registration and lookups over an injected store.

use std::sync::Arc;

use accounts_core::credentials::derive_password_hash;
use accounts_core::error::CoreError;
use accounts_core::fields::{
    self, MSG_FIRST_NAME_REQUIRED, MSG_LAST_NAME_REQUIRED, MSG_PASSWORD_REQUIRED,
    MSG_USERNAME_REQUIRED,
};
use accounts_core::types::DbId;
use accounts_db::models::user::{NewUser, User};
use accounts_db::store::UserStore;

use crate::error::AppResult;

/// Registration input before validation. Any field may be missing.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

/// Registers users and answers lookups against a [`UserStore`].
///
/// Cheaply cloneable; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Exact, case-sensitive lookup.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.store.find_by_username(username).await?)
    }

    pub async fn find_by_id(&self, id: DbId) -> AppResult<Option<User>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Every registered user, in id order.
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.store.list().await?)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        Ok(self.store.health_check().await?)
    }

    /// Validate `profile` and `password`, hash the password, and persist the
    /// new user.
    ///
    /// Fields are checked in order (first name, last name, username,
    /// password) and the first blank one is reported. A taken username is a
    /// validation error too. Nothing is written when validation fails.
    pub async fn create(&self, profile: UserProfile, password: Option<&str>) -> AppResult<User> {
        let first_name = fields::require(profile.first_name.as_deref(), MSG_FIRST_NAME_REQUIRED)?;
        let last_name = fields::require(profile.last_name.as_deref(), MSG_LAST_NAME_REQUIRED)?;
        let username = fields::require(profile.username.as_deref(), MSG_USERNAME_REQUIRED)?;
        let password = fields::require(password, MSG_PASSWORD_REQUIRED)?;

        if self.store.username_exists(username).await? {
            return Err(CoreError::Validation(fields::username_taken_message(username)).into());
        }

        let digest = derive_password_hash(password);
        let input = NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            username: username.to_string(),
            password_hash: digest.hash,
            password_salt: digest.salt,
        };

        // The store re-checks uniqueness atomically; a concurrent winner
        // surfaces here as the same validation error.
        let user = self.store.insert(input).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }
}
