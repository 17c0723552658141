//! Store error taxonomy.

use thiserror::Error;

/// Failures surfaced by [`AssetStore`](crate::AssetStore) operations.
///
/// Callers distinguish "not found" from a storage fault so the HTTP
/// adapter can pick the right status code.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested asset does not exist.
    #[error("asset not found")]
    NotFound,

    /// The supplied fields violate an asset invariant.
    #[error("invalid asset: {0}")]
    Invalid(String),

    /// An unexpected fault while accessing the store.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}
