//! File discovery module for finding onboardable images
//!
//! Provides directory traversal with include/exclude glob filtering and a
//! default set of supported image extensions. Hidden files are never
//! picked up regardless of patterns.

mod extensions;
mod filter;
mod walker;

pub use walker::{FileDiscovery, FileDiscoveryOptions};

use std::path::PathBuf;

/// Result of file discovery
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path to the discovered file
    pub path: PathBuf,
    /// Size of the file in bytes
    pub size: u64,
}

/// Error type for file discovery operations
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Result type for file discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
