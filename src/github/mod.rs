//! GitHub access for the TODO scan.
//!
//! This module wraps Octocrab to list the files a pull request touches, fetch
//! their content at a branch, and write Markdown back as a comment or as the
//! pull request description. Octocrab errors are mapped into
//! [`TodeyError`] variants so callers can report precise failures.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::TodeyError;
pub use gateway::{OctocrabGateway, PublishGateway, PullRequestGateway};
pub use locator::{
    DEFAULT_API_BASE, PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName,
    RepositoryOwner,
};
pub use models::{ChangedFile, PublishOutcome};

#[cfg(test)]
pub use gateway::{MockPublishGateway, MockPullRequestGateway};

#[cfg(test)]
mod tests;
