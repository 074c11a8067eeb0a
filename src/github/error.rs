//! Error types exposed by the GitHub scanning layer.

use thiserror::Error;

/// Errors surfaced while resolving configuration or talking to GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodeyError {
    /// No pull request number was configured.
    #[error("pull request number is required")]
    MissingPullRequestNumber,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// No repository was configured.
    #[error("repository is required (expected owner/repo)")]
    MissingRepository,

    /// Neither a GitHub user nor an `owner/` prefix named the owner.
    #[error("repository owner is required (set the GitHub user or use owner/repo)")]
    MissingOwner,

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// A URL or request path could not be built.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication error or an unreadable body.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// File content could not be decoded into UTF-8 text.
    #[error("could not decode {path}: {message}")]
    Decode {
        /// Repository-relative path of the file.
        path: String,
        /// Why decoding failed.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl TodeyError {
    /// Returns `true` when the error came from the HTTP transport or from an
    /// unusable API response rather than from local input.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Network { .. } | Self::Authentication { .. }
        )
    }
}
