//! Error types for the capability registry

use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Registry error types
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Target type not registered: {0}")]
    TargetNotFound(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Failed to construct target {0}: {1}")]
    TargetConstruction(String, String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Prompt file not found: {0}")]
    PromptFileNotFound(String),

    #[error("Unsupported prompt file type: {0}")]
    UnsupportedPromptFile(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
