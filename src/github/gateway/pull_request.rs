//! Octocrab implementation of the pull request gateways.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::{Octocrab, Page};

use crate::github::error::TodeyError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator};
use crate::github::models::{
    ApiBodyRequest, ApiFileContent, ApiPullRequestFile, ApiRefQuery, ChangedFile, PublishOutcome,
};

use super::client::build_octocrab_client;
use super::error_mapping::{Operation, map_octocrab_error};
use super::http_utils::extract_github_message;
use super::{PublishGateway, PullRequestGateway};

/// Where a Markdown body is written on the pull request.
#[derive(Debug, Clone, Copy)]
enum BodyTarget {
    Comment,
    Description,
}

impl BodyTarget {
    const fn operation(self) -> Operation {
        match self {
            Self::Comment => Operation::CreateComment,
            Self::Description => Operation::UpdateDescription,
        }
    }

    const fn expected_status(self) -> StatusCode {
        match self {
            Self::Comment => StatusCode::CREATED,
            Self::Description => StatusCode::OK,
        }
    }

    fn path(self, locator: &PullRequestLocator) -> String {
        match self {
            Self::Comment => locator.comments_path(),
            Self::Description => locator.pull_request_path(),
        }
    }
}

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and the locator's API
    /// base.
    ///
    /// # Errors
    ///
    /// Returns `TodeyError::InvalidUrl` when the base URI cannot be parsed or
    /// `TodeyError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &PullRequestLocator,
    ) -> Result<Self, TodeyError> {
        let octocrab = build_octocrab_client(token, locator.api_base())?;
        Ok(Self::new(octocrab))
    }

    async fn write_body(
        &self,
        target: BodyTarget,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<PublishOutcome, TodeyError> {
        let uri: Uri = target
            .path(locator)
            .parse::<Uri>()
            .map_err(|error| TodeyError::InvalidUrl(error.to_string()))?;
        let request = ApiBodyRequest { body };

        let response = match target {
            BodyTarget::Comment => self.client._post(uri, Some(&request)).await,
            BodyTarget::Description => self.client._patch(uri, Some(&request)).await,
        }
        .map_err(|error| map_octocrab_error(target.operation(), &error))?;

        let status = response.status();
        let outcome = PublishOutcome::from_status(status, target.expected_status());

        if !outcome.is_success() {
            let detail = self
                .client
                .body_to_string(response)
                .await
                .ok()
                .and_then(|raw| extract_github_message(&raw))
                .unwrap_or_else(|| "no message".to_owned());
            tracing::warn!(
                operation = %target.operation(),
                %status,
                %detail,
                "GitHub did not accept the write"
            );
        }

        Ok(outcome)
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn changed_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ChangedFile>, TodeyError> {
        let page = self
            .client
            .get::<Page<ApiPullRequestFile>, _, _>(locator.files_path(), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error(Operation::ListFiles, &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|files| {
                files
                    .into_iter()
                    .filter_map(ApiPullRequestFile::into_changed)
                    .collect()
            })
            .map_err(|error| map_octocrab_error(Operation::ListFiles, &error))
    }

    async fn file_content(
        &self,
        locator: &PullRequestLocator,
        file: &ChangedFile,
        branch: &str,
    ) -> Result<String, TodeyError> {
        let route = locator.contents_path(file)?;
        let query = ApiRefQuery { git_ref: branch };

        self.client
            .get::<ApiFileContent, _, _>(route, Some(&query))
            .await
            .map_err(|error| map_octocrab_error(Operation::FetchContent, &error))?
            .decode(file)
    }
}

#[async_trait]
impl PublishGateway for OctocrabGateway {
    async fn create_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<PublishOutcome, TodeyError> {
        self.write_body(BodyTarget::Comment, locator, body).await
    }

    async fn update_description(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<PublishOutcome, TodeyError> {
        self.write_body(BodyTarget::Description, locator, body).await
    }
}
