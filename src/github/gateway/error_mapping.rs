//! Maps Octocrab failures onto [`TodeyError`] variants.

use std::fmt;

use http::StatusCode;

use crate::github::error::TodeyError;

/// GitHub call that was in flight when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Operation {
    BuildClient,
    ListFiles,
    FetchContent,
    CreateComment,
    UpdateDescription,
}

impl Operation {
    const fn label(self) -> &'static str {
        match self {
            Self::BuildClient => "build client",
            Self::ListFiles => "list pull request files",
            Self::FetchContent => "fetch file contents",
            Self::CreateComment => "create comment",
            Self::UpdateDescription => "update description",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 401 and 403 both mean the token cannot be used for the call.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Classifies an error response GitHub sent back for `operation`.
pub(super) fn map_github_status(
    operation: Operation,
    status: StatusCode,
    message: &str,
) -> TodeyError {
    if is_auth_failure(status) {
        return TodeyError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        };
    }

    let hint = if status == StatusCode::NOT_FOUND {
        " (check the repository, pull request number and branch)"
    } else {
        ""
    };
    TodeyError::Api {
        message: format!("{operation} failed with status {status}: {message}{hint}"),
    }
}

pub(super) fn map_octocrab_error(operation: Operation, error: &octocrab::Error) -> TodeyError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_github_status(operation, source.status_code, &source.message);
    }

    if is_network_error(error) {
        return TodeyError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    // The response arrived but did not match the expected schema.
    TodeyError::Api {
        message: format!("{operation} returned an unreadable response: {error}"),
    }
}
