//! Scan a single pull request and report the result.

use todey::{OctocrabGateway, TodeyConfig, TodeyError, TodoScan};

use super::output::write_outcome;

/// Scans the configured pull request and publishes its TODO report.
///
/// # Errors
///
/// Returns [`TodeyError::MissingPullRequestNumber`] and friends when the
/// configuration is incomplete, and transport or decode errors from GitHub.
/// A report that GitHub refuses is printed, not returned as an error.
pub async fn run(config: &TodeyConfig) -> Result<(), TodeyError> {
    let settings = config.resolve()?;

    let gateway = OctocrabGateway::for_token(&settings.token, &settings.locator)?;
    let scan = TodoScan::new(&gateway, &gateway);
    let outcome = scan.run(&settings).await?;

    write_outcome(&outcome)
}
