//! User entity model and DTOs.

use accounts_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and salt -- never serialize this to API
/// responses directly.
#[derive(Clone, FromRow, PartialEq, Eq)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub created_at: Timestamp,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// DTO for inserting a new user. The hash and salt are already derived.
#[derive(Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
}
