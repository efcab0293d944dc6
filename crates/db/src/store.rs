//! The storage seam for user records.
//!
//! [`UserStore`] is what the service layer holds (as `Arc<dyn UserStore>`).
//! [`PgUserStore`] delegates to [`UserRepo`]; [`MemoryUserStore`] keeps rows
//! in process and backs tests and database-less local runs.
//!
//! Both implementations make username uniqueness part of the insert itself:
//! PostgreSQL through the `uq_users_username` constraint, the memory store by
//! checking and inserting under one write lock. Two concurrent registrations
//! for the same username therefore cannot both succeed.

use accounts_core::types::DbId;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::user::{NewUser, User};
use crate::repositories::user_repo::USERNAME_UNIQUE_CONSTRAINT;
use crate::repositories::UserRepo;
use crate::DbPool;

/// Failures raised by a [`UserStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The username is already taken.
    #[error("Duplicate username: {0}")]
    DuplicateUsername(String),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Insert-and-read access to user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive username lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError>;

    /// All users, ordered by id.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Persist a new user and return the stored row with its assigned id.
    ///
    /// Fails with [`StoreError::DuplicateUsername`] if the username exists.
    async fn insert(&self, input: NewUser) -> Result<User, StoreError>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`UserStore`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(UserRepo::username_exists(&self.pool, username).await?)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn insert(&self, input: NewUser) -> Result<User, StoreError> {
        match UserRepo::create(&self.pool, &input).await {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT) =>
            {
                Err(StoreError::DuplicateUsername(input.username))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    last_id: DbId,
}

/// [`UserStore`] that keeps rows in process memory.
///
/// Ids start at 1 and increase monotonically, matching a fresh BIGSERIAL.
#[derive(Default)]
pub struct MemoryUserStore {
    state: RwLock<MemoryState>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().any(|u| u.username == username))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        // Rows are appended with increasing ids, so insertion order is id order.
        Ok(self.state.read().await.users.clone())
    }

    async fn insert(&self, input: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::DuplicateUsername(input.username));
        }

        state.last_id += 1;
        let user = User {
            id: state.last_id,
            first_name: input.first_name,
            last_name: input.last_name,
            username: input.username,
            password_hash: input.password_hash,
            password_salt: input.password_salt,
            created_at: chrono::Utc::now(),
        };
        state.users.push(user.clone());
        tracing::debug!(user_id = user.id, "Inserted user into memory store");
        Ok(user)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
