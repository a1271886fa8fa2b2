//! Error types for reconciliation operations.
//!
//! Each phase of a reconciliation run has its own error variant so that
//! failures surface with enough context to tell a download problem from
//! a host filesystem problem. None of these are retried internally.

use std::io;
use std::path::PathBuf;

/// Result type alias for reconciliation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converging a host.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request violated a data-model invariant.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Probing the host failed with something other than "not found".
    #[error("probe failed at {path}: {source}")]
    Probe {
        /// Path being probed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Downloading the installer archive failed.
    #[error(
        "download failed for {url}: {message}{}",
        .status.map_or_else(String::new, |code| format!(" (HTTP {code})"))
    )]
    Fetch {
        /// URL being fetched.
        url: String,
        /// Error message.
        message: String,
        /// HTTP status code if the server answered.
        status: Option<u16>,
    },

    /// The downloaded archive could not be unpacked.
    #[error("extraction failed: {0}")]
    Extract(String),

    /// The vendor installer could not be run or exited non-zero, or
    /// permission normalization failed.
    #[error("install failed: {0}")]
    Install(String),

    /// IO failure while removing installed files.
    #[error("removal failed at {path}: {source}")]
    Removal {
        /// Path being removed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// IO error during staging file operations.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a removal error with path context.
    pub fn removal(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Removal {
            path: path.into(),
            source,
        }
    }

    /// Create a fetch error without an HTTP status.
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_constructor_keeps_path() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::io("/tmp/staging", io_err);
        match err {
            Error::Io { path, .. } => assert_eq!(path, PathBuf::from("/tmp/staging")),
            _ => panic!("Expected Error::Io"),
        }
    }

    #[test]
    fn test_fetch_constructor() {
        let err = Error::fetch("https://example.com/cli.zip", "connection reset");
        match err {
            Error::Fetch {
                url,
                message,
                status,
            } => {
                assert_eq!(url, "https://example.com/cli.zip");
                assert_eq!(message, "connection reset");
                assert_eq!(status, None);
            }
            _ => panic!("Expected Error::Fetch"),
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::Fetch {
            url: "https://example.com/cli.zip".to_string(),
            message: "service unavailable".to_string(),
            status: Some(503),
        };
        let display = format!("{}", err);
        assert!(display.contains("example.com"));
        assert!(display.contains("(HTTP 503)"));

        let err = Error::InvalidRequest("bin_dir must be absolute".to_string());
        assert!(format!("{}", err).contains("bin_dir"));
    }

    #[test]
    fn test_fetch_display_without_status() {
        let err = Error::fetch("https://example.com/cli.zip", "connection reset");
        let display = format!("{}", err);
        assert!(display.contains("connection reset"));
        assert!(!display.contains("HTTP"));
    }

    #[test]
    fn test_removal_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let err = Error::removal("/usr/local/bin/aws", io_err);
        let display = format!("{}", err);
        assert!(display.contains("/usr/local/bin/aws"));
        assert!(display.contains("removal failed"));
    }
}
