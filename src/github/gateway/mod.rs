//! Gateways for reading and commenting on pull requests through Octocrab.
//!
//! Reads and writes sit behind separate traits so the scan pipeline can be
//! exercised with mocks, while [`OctocrabGateway`] performs the real HTTP
//! requests.

mod client;
mod error_mapping;
mod http_utils;
mod pull_request;

#[cfg(test)]
mod tests;

pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::TodeyError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::{ChangedFile, PublishOutcome};

/// Gateway that reads the files touched by a pull request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// List every changed file except those the pull request removes.
    async fn changed_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ChangedFile>, TodeyError>;

    /// Fetch the decoded text of `file` at `branch`.
    async fn file_content(
        &self,
        locator: &PullRequestLocator,
        file: &ChangedFile,
        branch: &str,
    ) -> Result<String, TodeyError>;
}

/// Gateway that writes Markdown back to a pull request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublishGateway: Send + Sync {
    /// Post `body` as a new issue comment on the pull request.
    async fn create_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<PublishOutcome, TodeyError>;

    /// Replace the pull request description with `body`.
    async fn update_description(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<PublishOutcome, TodeyError>;
}
