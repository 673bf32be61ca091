use thiserror::Error;

/// Failure reported by a storage surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// The surface does not exist in this environment (no `window`, storage disabled).
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
    /// The surface exists but rejected the operation (quota, privacy mode).
    #[error("{surface} rejected the operation: {message}")]
    Rejected {
        surface: &'static str,
        message: String,
    },
    #[error("stored value could not be decoded: {0}")]
    Corrupt(String),
}
