use crate::models::Rarity;

/// Failures raised by a catalog collaborator (network, disk cache, parsing).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Offline: {0}")]
    Offline(String),

    #[error("Malformed catalog data: {0}")]
    Malformed(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum PullError {
    #[error("Pack not found: {0}")]
    PackNotFound(String),

    #[error("Baseline pack not found in catalog")]
    BaselinePackNotFound,

    #[error("No {0} cards available in the card pool")]
    PoolExhausted(Rarity),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PullError {
    /// True when the failure was caused by the caller's input rather than by
    /// upstream data or infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PullError::PackNotFound(_)
                | PullError::BaselinePackNotFound
                | PullError::InvalidArgument(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PullError>;
