//! Cloud provider error types

use thiserror::Error;

/// Errors reported by the provider or the request layer
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
