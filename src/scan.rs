//! Scan pipeline: list changed files, extract annotations, publish a report.

use crate::annotations::{LinkContext, Report, ReportBuilder, extract};
use crate::config::{PublishTarget, RunSettings};
use crate::github::error::TodeyError;
use crate::github::gateway::{PublishGateway, PullRequestGateway};
use crate::github::models::PublishOutcome;

/// What a completed scan did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The pull request changes no files, so nothing was fetched or posted.
    NoChanges,
    /// A report was built and sent to GitHub.
    Published {
        /// Where the report was written.
        target: PublishTarget,
        /// How GitHub answered the write.
        outcome: PublishOutcome,
        /// The report that was sent.
        report: Report,
    },
}

/// Runs one scan against a pull request using the supplied gateways.
///
/// Files are fetched and scanned one at a time in listing order. Listing or
/// fetch failures abort the scan; a rejected write is returned as
/// [`PublishOutcome::Failure`] rather than an error.
pub struct TodoScan<'client, Reader, Publisher>
where
    Reader: PullRequestGateway,
    Publisher: PublishGateway,
{
    reader: &'client Reader,
    publisher: &'client Publisher,
}

impl<'client, Reader, Publisher> TodoScan<'client, Reader, Publisher>
where
    Reader: PullRequestGateway,
    Publisher: PublishGateway,
{
    /// Create a scan over the given gateways.
    #[must_use]
    pub const fn new(reader: &'client Reader, publisher: &'client Publisher) -> Self {
        Self { reader, publisher }
    }

    /// Build the report for the pull request, or `None` when it changes no
    /// files.
    ///
    /// # Errors
    ///
    /// Propagates listing, fetch and decode failures from the gateway.
    pub async fn collect(&self, settings: &RunSettings) -> Result<Option<Report>, TodeyError> {
        let locator = &settings.locator;
        let changed = self.reader.changed_files(locator).await?;
        tracing::info!(files = changed.len(), "listed changed files");

        if changed.is_empty() {
            return Ok(None);
        }

        let context = LinkContext {
            owner: locator.owner().as_str(),
            repository: locator.repository().as_str(),
            branch: &settings.branch,
        };
        let mut builder = ReportBuilder::new();

        for file in &changed {
            let text = self
                .reader
                .file_content(locator, file, &settings.branch)
                .await?;
            let found = builder.push_file(file.as_str(), extract(&text, file.as_str(), context));
            tracing::debug!(path = %file, annotations = found, "scanned file");
        }

        let report = builder.finish();
        tracing::info!(
            files = report.file_count(),
            annotations = report.annotation_count(),
            "built TODO report"
        );
        Ok(Some(report))
    }

    /// Write `report` to the configured target.
    ///
    /// # Errors
    ///
    /// Returns transport failures; a response with an unexpected status is
    /// reported through [`PublishOutcome::Failure`].
    pub async fn publish(
        &self,
        settings: &RunSettings,
        report: &Report,
    ) -> Result<PublishOutcome, TodeyError> {
        let locator = &settings.locator;
        match settings.target {
            PublishTarget::Comment => {
                self.publisher
                    .create_comment(locator, report.as_str())
                    .await
            }
            PublishTarget::Description => {
                self.publisher
                    .update_description(locator, report.as_str())
                    .await
            }
        }
    }

    /// Run the full scan.
    ///
    /// # Errors
    ///
    /// See [`TodoScan::collect`] and [`TodoScan::publish`].
    pub async fn run(&self, settings: &RunSettings) -> Result<ScanOutcome, TodeyError> {
        tracing::info!(
            owner = settings.locator.owner().as_str(),
            repository = settings.locator.repository().as_str(),
            pull_request = settings.locator.number().get(),
            branch = %settings.branch,
            "scanning pull request"
        );

        let Some(report) = self.collect(settings).await? else {
            return Ok(ScanOutcome::NoChanges);
        };

        let outcome = self.publish(settings, &report).await?;
        match outcome {
            PublishOutcome::Success => {
                tracing::info!(destination = ?settings.target, "report published");
            }
            PublishOutcome::Failure(status) => {
                tracing::warn!(destination = ?settings.target, %status, "report was not accepted");
            }
        }

        Ok(ScanOutcome::Published {
            target: settings.target,
            outcome,
            report,
        })
    }
}
