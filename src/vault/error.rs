use thiserror::Error;

/// Failures inside the password store. The public store operations absorb
/// these and return safe defaults; the `try_*` variants surface them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Stored text is malformed, or a value could not be serialized.
    #[error("stored data could not be encoded or decoded: {0:#}")]
    Codec(#[source] anyhow::Error),

    /// The key-value store itself failed.
    #[error("storage backend failure: {0:#}")]
    Backend(#[source] anyhow::Error),

    #[error("storage task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StoreError {
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Codec(_))
    }
}
