//! Domain error types
//!
//! This module defines the error hierarchy for bibsync. All errors are
//! domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main bibsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum BibsyncError {
    /// Configuration-related errors (missing or invalid config/mapping file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Base Bibliotek feed errors (download, snapshot parsing)
    #[error("Base Bibliotek error: {0}")]
    Registry(#[from] RegistryError),

    /// Target API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Base Bibliotek feed errors
///
/// Errors that occur while fetching or reading snapshot files.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Failed to reach the feed host
    #[error("Failed to connect to the Base Bibliotek feed: {0}")]
    ConnectionFailed(String),

    /// The feed has no snapshot under this name (HTTP 404). For daily
    /// diffs this is an expected possibility, but it still aborts the run.
    #[error("No snapshot published at {url}")]
    SnapshotNotFound { url: String },

    /// The feed answered with a non-success status
    #[error("Snapshot download failed with status {status}: {url}")]
    DownloadFailed { status: u16, url: String },

    /// The snapshot file is still missing after a download attempt
    #[error("Snapshot file missing after download: {}", path.display())]
    SnapshotMissing { path: PathBuf },

    /// The snapshot document could not be parsed
    #[error("Invalid snapshot document: {0}")]
    InvalidSnapshot(String),

    /// Local filesystem errors while storing or reading a snapshot
    #[error("Snapshot I/O error: {0}")]
    Io(String),
}

/// Target API errors
///
/// Errors from the library-system API. A normal failed upsert (the API
/// answers with a non-"ok" status) is NOT an error — it is reported as an
/// unsuccessful upsert outcome. These variants cover connection-level and
/// protocol-level failures only.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the API host
    #[error("Failed to connect to the API: {0}")]
    ConnectionFailed(String),

    /// The API rejected the configured credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API response body could not be parsed as XML
    #[error("Invalid response from the API: {0}")]
    InvalidResponse(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for BibsyncError {
    fn from(err: std::io::Error) -> Self {
        BibsyncError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BibsyncError {
    fn from(err: toml::de::Error) -> Self {
        BibsyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
