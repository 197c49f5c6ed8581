//! Errors surfaced by storefront rendering.

use mercado_core::CartStorageError;
use thiserror::Error;

/// Errors from rendering views or touching cart storage.
///
/// Catalog API failures are not part of this type: views log them and
/// render what they have.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Template rendering failed.
    #[error("template error: {0}")]
    Render(#[from] askama::Error),

    /// Cart storage could not be written.
    #[error(transparent)]
    Storage(#[from] CartStorageError),
}
