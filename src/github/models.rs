//! Data models for the pull request endpoints the scanner talks to.
//!
//! Types prefixed with `Api` are deserialisation targets for GitHub responses
//! (or serialisation sources for request bodies); they convert into the
//! public domain types so malformed payloads fail with a named error.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use super::error::TodeyError;

/// Repository-relative path of a file touched by the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangedFile(String);

impl ChangedFile {
    /// Wraps a repository-relative path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrow the path.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ChangedFile {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Result of a write call that reached GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// GitHub answered with the expected success status.
    Success,
    /// GitHub answered with any other status.
    Failure(StatusCode),
}

impl PublishOutcome {
    /// Classifies a response status against the status the endpoint returns
    /// on success.
    #[must_use]
    pub fn from_status(status: StatusCode, expected: StatusCode) -> Self {
        if status == expected {
            Self::Success
        } else {
            Self::Failure(status)
        }
    }

    /// Returns `true` for [`PublishOutcome::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Change status GitHub reports for a pull request file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum ApiFileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Unknown,
}

/// Entry of `GET /repos/{owner}/{repo}/pulls/{n}/files`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestFile {
    pub(super) filename: String,
    pub(super) status: ApiFileStatus,
}

impl ApiPullRequestFile {
    pub(super) fn into_changed(self) -> Option<ChangedFile> {
        (self.status != ApiFileStatus::Removed).then(|| ChangedFile::new(self.filename))
    }
}

/// Body of `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiFileContent {
    pub(super) content: String,
    #[serde(default)]
    pub(super) encoding: Option<String>,
}

impl ApiFileContent {
    /// Decodes the base64 payload into UTF-8 text.
    ///
    /// GitHub wraps the payload at 60 columns, so line breaks are stripped
    /// before decoding. Files over 1 MB come back with encoding `none` and no
    /// inline content; they are scanned as empty text.
    pub(super) fn decode(self, file: &ChangedFile) -> Result<String, TodeyError> {
        let decode_error = |message: String| TodeyError::Decode {
            path: file.as_str().to_owned(),
            message,
        };

        if self.encoding.as_deref() == Some("none") && self.content.is_empty() {
            tracing::warn!(path = %file, "file too large for inline content; skipping");
            return Ok(String::new());
        }

        if let Some(encoding) = self.encoding.as_deref()
            && encoding != "base64"
        {
            return Err(decode_error(format!("unsupported content encoding '{encoding}'")));
        }

        let packed: String = self
            .content
            .chars()
            .filter(|character| !character.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD
            .decode(packed)
            .map_err(|error| decode_error(format!("invalid base64: {error}")))?;

        String::from_utf8(bytes).map_err(|error| decode_error(format!("not UTF-8 text: {error}")))
    }
}

/// Query string for the contents endpoint.
#[derive(Debug, Serialize)]
pub(super) struct ApiRefQuery<'a> {
    #[serde(rename = "ref")]
    pub(super) git_ref: &'a str,
}

/// Request body shared by the comment and pull request update endpoints.
#[derive(Debug, Serialize)]
pub(super) struct ApiBodyRequest<'a> {
    pub(super) body: &'a str,
}
