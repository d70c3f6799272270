//! Typed errors for the container backends and the record store.
//!
//! The backend signals absence with a distinguishable `NotFound` variant;
//! the store translates that into `Option` / `bool` at its surface and
//! never exposes "not found" as an error.

use thiserror::Error;

/// Failure modes of an object container backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No object under this name.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Filesystem-level failure.
    #[error("io error: {0}")]
    Io(#[source] std::io::Error),

    /// Any other backend failure (permission, network, malformed container).
    #[error("backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Map an io::Error, turning `NotFound` into the distinguishable variant.
    pub fn from_io(name: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(name.to_string())
        } else {
            Self::Io(err)
        }
    }
}

/// Failure modes of the record store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key was empty. Programmer error, surfaced immediately.
    #[error("invalid key: must be non-empty")]
    InvalidKey,

    /// Record could not be encoded, or a present object could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Propagated backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
