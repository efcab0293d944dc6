use std::sync::Arc;

use accounts_core::clock::Clock;
use accounts_db::store::UserStore;

use crate::auth::session::SessionIssuer;
use crate::config::ServerConfig;
use crate::directory::UserDirectory;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Registration and lookups.
    pub directory: UserDirectory,
    /// Credential verification and token signing.
    pub sessions: Arc<SessionIssuer>,
}

impl AppState {
    /// Wire the directory and session issuer over `store`, signing with the
    /// configured JWT settings and reading time from `clock`.
    pub fn new(config: ServerConfig, store: Arc<dyn UserStore>, clock: Arc<dyn Clock>) -> Self {
        let directory = UserDirectory::new(store);
        let sessions = SessionIssuer::new(directory.clone(), config.jwt.clone(), clock);
        Self {
            config: Arc::new(config),
            directory,
            sessions: Arc::new(sessions),
        }
    }
}
