/// Domain error taxonomy shared by every layer above the store.
///
/// Messages are user-facing: the HTTP layer passes `Validation` text through
/// to the client verbatim.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
