//! Markdown report assembled from per-file annotations.

use super::extract::Annotation;

/// First line of every report.
pub const REPORT_PREAMBLE: &str = "Here are the extracted TODO from the changed files:\n\n";

/// Finished Markdown report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    body: String,
    file_count: usize,
    annotation_count: usize,
}

impl Report {
    /// Borrow the Markdown body.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.body.as_str()
    }

    /// Consume the report, returning the Markdown body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Number of files that contributed at least one annotation.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Number of annotation bullets in the report.
    #[must_use]
    pub const fn annotation_count(&self) -> usize {
        self.annotation_count
    }
}

/// Append-only builder that emits one section per annotated file.
///
/// Sections appear in the order files are pushed and bullets in the order
/// annotations are yielded; nothing is sorted or de-duplicated.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    body: String,
    file_count: usize,
    annotation_count: usize,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    /// Starts a report containing only the preamble.
    #[must_use]
    pub fn new() -> Self {
        Self {
            body: REPORT_PREAMBLE.to_owned(),
            file_count: 0,
            annotation_count: 0,
        }
    }

    /// Appends the section for `path`, returning how many bullets it added.
    ///
    /// A file without annotations adds nothing, not even its heading.
    pub fn push_file<I>(&mut self, path: &str, annotations: I) -> usize
    where
        I: IntoIterator<Item = Annotation>,
    {
        let mut pending = annotations.into_iter().peekable();
        if pending.peek().is_none() {
            return 0;
        }

        self.body.push_str(&format!("\n#### {path}:\n"));
        let mut added = 0;
        for annotation in pending {
            self.body.push_str(&format!(
                "- {content} - [Line: {line}]({link})\n",
                content = annotation.content,
                line = annotation.line_number,
                link = annotation.link,
            ));
            added += 1;
        }

        self.file_count += 1;
        self.annotation_count += added;
        added
    }

    /// Finalises the report.
    #[must_use]
    pub fn finish(self) -> Report {
        Report {
            body: self.body,
            file_count: self.file_count,
            annotation_count: self.annotation_count,
        }
    }
}

/// Builds a report from `(path, annotations)` pairs in the given order.
pub fn build_report<'p, Files, Annotated>(per_file: Files) -> Report
where
    Files: IntoIterator<Item = (&'p str, Annotated)>,
    Annotated: IntoIterator<Item = Annotation>,
{
    let mut builder = ReportBuilder::new();
    for (path, annotations) in per_file {
        builder.push_file(path, annotations);
    }
    builder.finish()
}
