//! Error types and handling for folio-core operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Most of the
//! content pipeline never lets these errors reach its callers: a failed post
//! becomes `None`, a failed manifest becomes an empty collection, and a failed
//! highlight becomes plain escaped text. The error type still carries enough
//! structure for those recovery points to log what went wrong.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading a local content tree
//! - **Network Errors**: HTTP requests against a remote content host
//! - **Serialization Errors**: manifests that are not a JSON array of strings
//! - **Identifier Errors**: post identifiers that would escape the content root
//! - **Configuration Errors**: invalid settings or config files
//! - **Highlight Errors**: the syntax highlighter rejected a code block
//!
//! ## Recovery Hints
//!
//! ```rust
//! use folio_core::Error;
//!
//! let err = Error::Timeout("manifest request".to_string());
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "timeout");
//! ```

use thiserror::Error;

/// The main error type for folio-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reads from a local content directory. A missing file is mapped to
    /// [`Error::NotFound`] before it gets here.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Connection and timeout errors are typically recoverable, while
    /// malformed URLs and server errors are not.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Requested manifest or document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A post identifier is empty or would resolve outside its language directory.
    #[error("Invalid post identifier: '{0}'")]
    InvalidIdentifier(String),

    /// A language tag is not one of the supported locales.
    #[error("Unsupported language: '{0}' (expected 'en' or 'es')")]
    InvalidLanguage(String),

    /// A content source location could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    ///
    /// Raised for manifests that are not a JSON array of strings. Config
    /// files that are not valid TOML are reported as [`Error::Config`].
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The syntax highlighter could not process a code block.
    #[error("Highlight error: {0}")]
    Highlight(String),

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<syntect::Error> for Error {
    fn from(err: syntect::Error) -> Self {
        Self::Highlight(err.to_string())
    }
}

impl Error {
    /// Check if the error might go away if the operation is retried.
    ///
    /// Returns `true` for network timeouts, connection failures, and
    /// interrupted or timed-out I/O. Everything else is permanent for the
    /// given input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a static string identifier.
    ///
    /// Used as the `category` field on log events emitted at recovery points.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::NotFound(_) => "not_found",
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::InvalidLanguage(_) => "invalid_language",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Highlight(_) => "highlight",
            Self::Timeout(_) => "timeout",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_recoverable_errors() {
        let recoverable = vec![
            Error::Timeout("slow host".to_string()),
            Error::Io(io::Error::new(io::ErrorKind::TimedOut, "timeout")),
            Error::Io(io::Error::new(io::ErrorKind::Interrupted, "interrupted")),
        ];
        for err in recoverable {
            assert!(err.is_recoverable(), "{err} should be recoverable");
        }
    }

    #[test]
    fn test_permanent_errors() {
        let permanent = vec![
            Error::Serialization("bad manifest".to_string()),
            Error::NotFound("/en/missing.md".to_string()),
            Error::InvalidIdentifier("../secret".to_string()),
            Error::Config("missing field".to_string()),
            Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        ];
        for err in permanent {
            assert!(!err.is_recoverable(), "{err} should not be recoverable");
        }
    }

    #[test]
    fn test_categories_are_stable() {
        assert_eq!(Error::Serialization(String::new()).category(), "serialization");
        assert_eq!(Error::NotFound(String::new()).category(), "not_found");
        assert_eq!(Error::Highlight(String::new()).category(), "highlight");
        assert_eq!(
            Error::InvalidLanguage("fr".to_string()).category(),
            "invalid_language"
        );
    }

    #[test]
    fn test_json_errors_become_serialization() {
        let err: Error = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidIdentifier("a/b".to_string());
        assert_eq!(err.to_string(), "Invalid post identifier: 'a/b'");
        let err = Error::InvalidLanguage("fr".to_string());
        assert!(err.to_string().contains("'fr'"));
    }
}
