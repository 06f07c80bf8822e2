//! Error types for the admin surfaces

use menutree_types::RestaurantId;
use thiserror::Error;

/// Errors from the restaurant directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("restaurant not found: {0}")]
    NotFound(RestaurantId),
}

/// Errors from the admin binary and its setup
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid catalog: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;
