//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use todey::config::PublishTarget;
use todey::{PublishOutcome, ScanOutcome, TodeyError};

/// Writes the summary line for a finished scan to stdout.
pub fn write_outcome(outcome: &ScanOutcome) -> Result<(), TodeyError> {
    let mut stdout = io::stdout().lock();
    write_outcome_to(&mut stdout, outcome)
}

/// Writes the summary line for a finished scan to the given writer.
pub fn write_outcome_to<W: Write>(writer: &mut W, outcome: &ScanOutcome) -> Result<(), TodeyError> {
    let message = match outcome {
        ScanOutcome::NoChanges => "No changes in the PR".to_owned(),
        ScanOutcome::Published {
            target,
            outcome: publish,
            ..
        } => publish_message(*target, *publish),
    };

    writeln!(writer, "{message}").map_err(|e| io_error(&e))
}

fn publish_message(target: PublishTarget, outcome: PublishOutcome) -> String {
    match (target, outcome) {
        (PublishTarget::Comment, PublishOutcome::Success) => {
            "PR comment added successfully.".to_owned()
        }
        (PublishTarget::Comment, PublishOutcome::Failure(status)) => format!(
            "Failed to add PR comment. Status code: {}",
            status.as_u16()
        ),
        (PublishTarget::Description, PublishOutcome::Success) => {
            "PR description updated successfully.".to_owned()
        }
        (PublishTarget::Description, PublishOutcome::Failure(status)) => format!(
            "Failed to update PR description. Status code: {}",
            status.as_u16()
        ),
    }
}

/// Converts an I/O error to a [`TodeyError::Io`].
pub(crate) fn io_error(error: &io::Error) -> TodeyError {
    TodeyError::Io {
        message: error.to_string(),
    }
}
