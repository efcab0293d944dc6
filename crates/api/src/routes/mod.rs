pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /createUser                                      register (public)
/// /request                                         sign in, returns token (public)
/// /usersList                                       list users (requires auth)
/// /users/{id}                                      get user (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(users::router())
}
