#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A delegated call (store, sub-service) failed.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
