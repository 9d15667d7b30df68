//! Crate-wide error type.

use thiserror::Error;

/// Errors returned by the caches, repositories and services.
#[derive(Debug, Error)]
pub enum Error {
    /// A kiosk item, gate or similar entry does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The caller passed something unusable (bad gate number, bad time).
    #[error("{0}")]
    InvalidArgument(String),

    /// A wrapped backend (fetcher, database) failed.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
