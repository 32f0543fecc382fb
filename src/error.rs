//! Error types for git-who-cache

use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Error types for cache and git operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// I/O error while reading or writing backend storage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A commit could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend storage is malformed
    #[error("Corrupt cache entry at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    /// Backend storage was written by an incompatible format version
    #[error("Cache version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    /// Git operation failed
    #[error("Git error: {0}")]
    Git(String),

    /// Not inside a git repository
    #[error("Not a git repository: {0}")]
    NotGitRepo(String),

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A backend lookup failed
    #[error("failed to retrieve from cache: {0}")]
    Retrieve(#[source] Box<CacheError>),
}

impl CacheError {
    /// Wrap a backend lookup failure with call-site context
    pub fn retrieve(inner: CacheError) -> Self {
        CacheError::Retrieve(Box::new(inner))
    }
}
