//! Annotation extraction and report assembly.
//!
//! [`extract`] finds `# TODO!:` markers in one file's text and
//! [`ReportBuilder`] folds the results for every changed file into the
//! Markdown posted on the pull request. Both are pure: they never touch the
//! network.

pub mod extract;
pub mod report;

pub use extract::{Annotation, AnnotationScan, Annotations, LinkContext, MARKER, extract};
pub use report::{REPORT_PREAMBLE, Report, ReportBuilder, build_report};
