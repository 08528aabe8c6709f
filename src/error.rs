//! Error Types
//!
//! One enum per concern. None of these are fatal: storage write failures are
//! logged, feed failures degrade a single source, import failures leave the
//! existing bookmarks untouched.

/// Browser storage access failed
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available: {0}")]
    Unavailable(String),

    #[error("Storage rejected write to '{key}': {message}")]
    WriteRejected { key: String, message: String },

    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Bookmark import aborted before anything was applied
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Could not read bookmarks file: {0}")]
    Read(String),

    #[error("Could not parse bookmarks file: {0}")]
    Parse(String),
}

/// A single feed source could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("API Error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Failure surfaced by `Dashboard::dispatch`
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Import(#[from] ImportError),
}
