//! Error types for the scaffold generator

use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Generator errors
///
/// Problems with a single field or reference are never errors; they degrade
/// in place. Only unreadable input, I/O, and developer errors end up here.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("Phrase '{key}' uses placeholder '{{{placeholder}}}' but no value was supplied")]
    MissingPlaceholder { key: String, placeholder: String },

    #[error("Entities '{first}' and '{second}' both generate {path}")]
    NameCollision {
        path: String,
        first: String,
        second: String,
    },
}
