//! Extraction of `# TODO!:` annotations from file text.

use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

/// Literal prefix that marks an annotation.
pub const MARKER: &str = "# TODO!: ";

#[expect(
    clippy::expect_used,
    reason = "the pattern is built from a constant and is covered by tests"
)]
static TODO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?m){}(.+)$", regex::escape(MARKER)))
        .expect("annotation pattern should compile")
});

/// Repository coordinates used to build deep links to annotated lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkContext<'a> {
    /// Repository owner.
    pub owner: &'a str,
    /// Repository name.
    pub repository: &'a str,
    /// Branch the file content was read from.
    pub branch: &'a str,
}

impl LinkContext<'_> {
    /// Builds the blob link for `line_number` of `path`.
    ///
    /// Path separators are rewritten to hyphens, so links to files below the
    /// repository root do not resolve on github.com. The format is kept as-is
    /// because existing comments and consumers rely on it.
    #[must_use]
    pub fn link(&self, path: &str, line_number: usize) -> String {
        format!(
            "https://github.com/{owner}/{repository}/blob/{branch}/{flattened}#L{line_number}",
            owner = self.owner,
            repository = self.repository,
            branch = self.branch,
            flattened = path.replace('/', "-"),
        )
    }
}

/// One marker occurrence found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Text following the marker, with surrounding whitespace removed.
    pub content: String,
    /// 1-based line the marker appears on.
    pub line_number: usize,
    /// Deep link to the annotated line.
    pub link: String,
}

/// A pending scan of one file's text.
///
/// Nothing is matched until the scan is iterated, and every iteration starts
/// again from the beginning of the text.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationScan<'t> {
    text: &'t str,
    path: &'t str,
    context: LinkContext<'t>,
}

/// Prepares a scan of `text`, the content of the file at `path`.
#[must_use]
pub const fn extract<'t>(
    text: &'t str,
    path: &'t str,
    context: LinkContext<'t>,
) -> AnnotationScan<'t> {
    AnnotationScan {
        text,
        path,
        context,
    }
}

impl<'t> AnnotationScan<'t> {
    /// Iterates the annotations in source order.
    #[must_use]
    pub fn iter(&self) -> Annotations<'t> {
        Annotations {
            matches: TODO_PATTERN.captures_iter(self.text),
            text: self.text,
            path: self.path,
            context: self.context,
            counted_to: 0,
            line: 1,
        }
    }
}

impl<'t> IntoIterator for &AnnotationScan<'t> {
    type Item = Annotation;
    type IntoIter = Annotations<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'t> IntoIterator for AnnotationScan<'t> {
    type Item = Annotation;
    type IntoIter = Annotations<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the annotations of one file.
#[derive(Debug)]
pub struct Annotations<'t> {
    matches: CaptureMatches<'static, 't>,
    text: &'t str,
    path: &'t str,
    context: LinkContext<'t>,
    counted_to: usize,
    line: usize,
}

impl Annotations<'_> {
    /// Advances the running line count to `offset`.
    ///
    /// Matches arrive in ascending order, so each byte is counted once.
    fn line_at(&mut self, offset: usize) -> usize {
        let skipped = self.text.get(self.counted_to..offset).unwrap_or_default();
        self.line += skipped.bytes().filter(|byte| *byte == b'\n').count();
        self.counted_to = offset;
        self.line
    }
}

impl Iterator for Annotations<'_> {
    type Item = Annotation;

    fn next(&mut self) -> Option<Self::Item> {
        let captures = self.matches.next()?;
        let start = captures.get(0)?.start();
        let content = captures.get(1)?.as_str().trim().to_owned();
        let line_number = self.line_at(start);

        Some(Annotation {
            content,
            line_number,
            link: self.context.link(self.path, line_number),
        })
    }
}
