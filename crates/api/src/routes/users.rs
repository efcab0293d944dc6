//! Route definitions for user accounts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST /createUser   -> register
/// POST /request      -> request_token
/// GET  /usersList    -> list_users (requires auth)
/// GET  /users/{id}   -> get_user (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/createUser", post(users::register))
        .route("/request", post(users::request_token))
        .route("/usersList", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
}
