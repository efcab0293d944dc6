//! Request handlers. Each handler delegates to the directory or the session
//! issuer in [`crate::state::AppState`] and maps errors via
//! [`crate::error::AppError`].

pub mod users;
