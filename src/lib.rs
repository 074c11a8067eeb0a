//! Todey library crate: collect `# TODO!:` annotations from a pull request.
//!
//! The library wraps Octocrab to list the files a pull request changes, read
//! their content from a branch, extract marked annotations, and publish a
//! Markdown report back to the pull request as a comment or description.

pub mod annotations;
pub mod config;
pub mod github;
pub mod scan;

pub use annotations::{Annotation, LinkContext, Report, ReportBuilder, extract};
pub use config::{PublishTarget, RunSettings, TodeyConfig};
pub use github::{
    ChangedFile, OctocrabGateway, PersonalAccessToken, PublishGateway, PublishOutcome,
    PullRequestGateway, PullRequestLocator, TodeyError,
};
pub use scan::{ScanOutcome, TodoScan};
