//! Identity wrappers and API paths for the pull request being scanned.

use url::Url;

use super::error::TodeyError;
use super::models::ChangedFile;

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`TodeyError::MissingOwner`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, TodeyError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TodeyError::MissingOwner);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the repository name is non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`TodeyError::MissingRepository`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, TodeyError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TodeyError::MissingRepository);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`TodeyError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, TodeyError> {
        if value == 0 {
            return Err(TodeyError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Parses a decimal pull request number, tolerating surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TodeyError::InvalidPullRequestNumber`] when the value is not
    /// a positive integer.
    pub fn parse(value: &str) -> Result<Self, TodeyError> {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| TodeyError::InvalidPullRequestNumber)
            .and_then(Self::new)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TodeyError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, TodeyError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TodeyError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// The pull request a run operates on, plus the API base serving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Builds a locator from validated parts and an API base URL such as
    /// `https://api.github.com` or `https://ghe.example.com/api/v3`.
    ///
    /// # Errors
    ///
    /// Returns [`TodeyError::InvalidUrl`] when the API base cannot be parsed.
    pub fn new(
        api_base: &str,
        owner: RepositoryOwner,
        repository: RepositoryName,
        number: PullRequestNumber,
    ) -> Result<Self, TodeyError> {
        let parsed =
            Url::parse(api_base).map_err(|error| TodeyError::InvalidUrl(error.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(TodeyError::InvalidUrl(format!(
                "{api_base} cannot serve as an API base"
            )));
        }

        Ok(Self {
            api_base: parsed,
            owner,
            repository,
            number,
        })
    }

    /// API base URL requests are sent to.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn files_path(&self) -> String {
        format!("{}/files", self.pull_request_path())
    }

    pub(crate) fn comments_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}/comments",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    /// Builds the contents path for a changed file, percent-encoding each
    /// path segment.
    pub(crate) fn contents_path(&self, file: &ChangedFile) -> Result<String, TodeyError> {
        let mut scratch = Url::parse(DEFAULT_API_BASE)
            .map_err(|error| TodeyError::InvalidUrl(error.to_string()))?;

        scratch
            .path_segments_mut()
            .map_err(|()| TodeyError::InvalidUrl("contents path cannot be built".to_owned()))?
            .extend([
                "repos",
                self.owner.as_str(),
                self.repository.as_str(),
                "contents",
            ])
            .extend(file.as_str().split('/'));

        Ok(scratch.path().to_owned())
    }
}
