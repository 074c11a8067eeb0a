//! Application configuration loaded from CLI, environment, and files.
//!
//! [`TodeyConfig`] merges command-line arguments, environment variables, and
//! configuration files using ortho-config's layered approach, and is then
//! resolved once into the [`RunSettings`] handed to the scan.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.todey.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `TODEY_PR_NUMBER`, `TODEY_REPO`, ...
//! 4. **Command-line arguments** – `--pr-number`/`-p`, `--repo`/`-r`, ...
//!
//! Values missing from every layer fall back to the unprefixed variables CI
//! workflows already export: `PR_NUMBER`, `GITHUB_USER`, `REPO`, `TOKEN` and
//! `BRANCH`.
//!
//! # Configuration File
//!
//! ```toml
//! pr_number = 42
//! github_user = "octocat"
//! repo = "octocat/hello-world"
//! token = "ghp_example"
//! branch = "main"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::TodeyError;
use crate::github::locator::{
    DEFAULT_API_BASE, PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName,
    RepositoryOwner,
};

/// Branch scanned when none is configured.
pub const DEFAULT_BRANCH: &str = "main";

const LEGACY_PR_NUMBER: &str = "PR_NUMBER";
const LEGACY_GITHUB_USER: &str = "GITHUB_USER";
const LEGACY_REPO: &str = "REPO";
const LEGACY_TOKEN: &str = "TOKEN";
const LEGACY_BRANCH: &str = "BRANCH";

/// Where the finished report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishTarget {
    /// Post a new comment on the pull request.
    Comment,
    /// Overwrite the pull request description.
    Description,
}

/// Fully resolved inputs for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Pull request being scanned.
    pub locator: PullRequestLocator,
    /// Token used for every API call.
    pub token: PersonalAccessToken,
    /// Branch file content is read from and deep links point at.
    pub branch: String,
    /// Where the report is written.
    pub target: PublishTarget,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use todey::TodeyConfig;
///
/// let config = TodeyConfig::load().expect("failed to load configuration");
/// let settings = config.resolve().expect("incomplete configuration");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TODEY",
    discovery(
        dotfile_name = ".todey.toml",
        config_file_name = "todey.toml",
        app_name = "todey"
    )
)]
pub struct TodeyConfig {
    /// Pull request number to scan.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-number <N>` or `-p <N>`
    /// - Environment: `TODEY_PR_NUMBER` or `PR_NUMBER` (legacy)
    /// - Config file: `pr_number = 42`
    #[ortho_config(cli_short = 'p')]
    pub pr_number: Option<u64>,

    /// GitHub user or organisation that owns the repository.
    ///
    /// Can be provided via:
    /// - CLI: `--github-user <LOGIN>` or `-u <LOGIN>`
    /// - Environment: `TODEY_GITHUB_USER` or `GITHUB_USER` (legacy)
    /// - Config file: `github_user = "..."`
    ///
    /// Defaults to the owner part of `repo`.
    #[ortho_config(cli_short = 'u')]
    pub github_user: Option<String>,

    /// Repository as `owner/repo`; only the part after the slash names the
    /// repository.
    ///
    /// Can be provided via:
    /// - CLI: `--repo <OWNER/REPO>` or `-r <OWNER/REPO>`
    /// - Environment: `TODEY_REPO` or `REPO` (legacy)
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `TODEY_TOKEN` or `TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Branch to read file content from. Defaults to `main`.
    ///
    /// Can be provided via:
    /// - CLI: `--branch <NAME>` or `-b <NAME>`
    /// - Environment: `TODEY_BRANCH` or `BRANCH` (legacy)
    /// - Config file: `branch = "..."`
    #[ortho_config(cli_short = 'b')]
    pub branch: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise installations.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base <URL>`
    /// - Environment: `TODEY_API_BASE`
    /// - Config file: `api_base = "https://ghe.example.com/api/v3"`
    ///
    /// Defaults to `https://api.github.com`.
    #[ortho_config()]
    pub api_base: Option<String>,

    /// Writes the report into the pull request description instead of
    /// posting a comment.
    ///
    /// Can be provided via:
    /// - CLI: `--update-description`
    /// - Config file: `update_description = true`
    #[ortho_config()]
    pub update_description: bool,
}

impl TodeyConfig {
    /// Resolves every setting, applying legacy environment fallbacks, into
    /// the value passed to the scan.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid setting, e.g.
    /// [`TodeyError::MissingPullRequestNumber`] or [`TodeyError::MissingToken`].
    pub fn resolve(&self) -> Result<RunSettings, TodeyError> {
        let number = self.resolve_pr_number()?;
        let (owner, repository) = self.resolve_repository()?;
        let token = PersonalAccessToken::new(self.resolve_token()?)?;
        let api_base = self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);

        Ok(RunSettings {
            locator: PullRequestLocator::new(api_base, owner, repository, number)?,
            token,
            branch: self.resolve_branch(),
            target: self.publish_target(),
        })
    }

    /// Returns the configured pull request number, falling back to
    /// `PR_NUMBER`.
    ///
    /// # Errors
    ///
    /// Returns [`TodeyError::MissingPullRequestNumber`] when no source sets
    /// it and [`TodeyError::InvalidPullRequestNumber`] when the value is not
    /// a positive integer.
    pub fn resolve_pr_number(&self) -> Result<PullRequestNumber, TodeyError> {
        if let Some(number) = self.pr_number {
            return PullRequestNumber::new(number);
        }

        legacy_var(LEGACY_PR_NUMBER)
            .ok_or(TodeyError::MissingPullRequestNumber)
            .and_then(|raw| PullRequestNumber::parse(&raw))
    }

    /// Resolves the repository owner and name.
    ///
    /// The name is the segment after the first `/` of `repo` (or the whole
    /// value when it has no slash). The owner is the GitHub user when set,
    /// otherwise the segment before the slash.
    ///
    /// # Errors
    ///
    /// Returns [`TodeyError::MissingRepository`] or [`TodeyError::MissingOwner`]
    /// when either part cannot be determined.
    pub fn resolve_repository(&self) -> Result<(RepositoryOwner, RepositoryName), TodeyError> {
        let slug = self
            .repo
            .clone()
            .or_else(|| legacy_var(LEGACY_REPO))
            .ok_or(TodeyError::MissingRepository)?;
        let (slug_owner, name) = split_repository(&slug);

        let repository = RepositoryName::new(name)?;
        let owner = match self
            .github_user
            .clone()
            .or_else(|| legacy_var(LEGACY_GITHUB_USER))
        {
            Some(user) => RepositoryOwner::new(&user)?,
            None => RepositoryOwner::new(slug_owner.unwrap_or_default())?,
        };

        Ok((owner, repository))
    }

    /// Resolves the token from configuration or the legacy `TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`TodeyError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, TodeyError> {
        self.token
            .clone()
            .or_else(|| legacy_var(LEGACY_TOKEN))
            .ok_or(TodeyError::MissingToken)
    }

    /// Returns the configured branch, the legacy `BRANCH` variable, or
    /// [`DEFAULT_BRANCH`], skipping blank values.
    #[must_use]
    pub fn resolve_branch(&self) -> String {
        self.branch
            .clone()
            .or_else(|| legacy_var(LEGACY_BRANCH))
            .map(|branch| branch.trim().to_owned())
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_owned())
    }

    /// Chooses where the report is written.
    #[must_use]
    pub const fn publish_target(&self) -> PublishTarget {
        if self.update_description {
            PublishTarget::Description
        } else {
            PublishTarget::Comment
        }
    }
}

fn legacy_var(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Splits `owner/repo` into its owner (if present) and repository name.
fn split_repository(slug: &str) -> (Option<&str>, &str) {
    let mut segments = slug.trim().split('/');
    let first = segments.next().unwrap_or_default();
    segments
        .next()
        .map_or((None, first), |name| (Some(first), name))
}
