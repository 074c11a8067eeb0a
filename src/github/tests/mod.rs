//! Unit tests for pull request identity and API paths.

use rstest::{fixture, rstest};

use super::{
    ChangedFile, PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName,
    RepositoryOwner, TodeyError,
};

#[fixture]
fn locator() -> PullRequestLocator {
    PullRequestLocator::new(
        "https://api.github.com",
        RepositoryOwner::new("acme").expect("owner should be valid"),
        RepositoryName::new("widgets").expect("repository should be valid"),
        PullRequestNumber::new(12).expect("number should be valid"),
    )
    .expect("locator should build")
}

#[rstest]
fn builds_pull_request_paths(locator: PullRequestLocator) {
    assert_eq!(locator.pull_request_path(), "/repos/acme/widgets/pulls/12");
    assert_eq!(
        locator.files_path(),
        "/repos/acme/widgets/pulls/12/files",
        "files path mismatch"
    );
    assert_eq!(
        locator.comments_path(),
        "/repos/acme/widgets/issues/12/comments",
        "comments path mismatch"
    );
}

#[rstest]
#[case::top_level("README.md", "/repos/acme/widgets/contents/README.md")]
#[case::nested("src/app.py", "/repos/acme/widgets/contents/src/app.py")]
#[case::space("docs/release notes.md", "/repos/acme/widgets/contents/docs/release%20notes.md")]
#[case::hash("notes/#1.md", "/repos/acme/widgets/contents/notes/%231.md")]
fn builds_contents_paths(locator: PullRequestLocator, #[case] file: &str, #[case] expected: &str) {
    let built = locator
        .contents_path(&ChangedFile::new(file))
        .expect("contents path should build");
    assert_eq!(built, expected);
}

#[rstest]
fn keeps_enterprise_api_base() {
    let locator = PullRequestLocator::new(
        "https://ghe.example.com/api/v3",
        RepositoryOwner::new("foo").expect("owner should be valid"),
        RepositoryName::new("bar").expect("repository should be valid"),
        PullRequestNumber::new(7).expect("number should be valid"),
    )
    .expect("enterprise locator should build");

    assert_eq!(locator.api_base().as_str(), "https://ghe.example.com/api/v3");
}

#[rstest]
fn rejects_unparseable_api_base() {
    let result = PullRequestLocator::new(
        "api.github.com",
        RepositoryOwner::new("acme").expect("owner should be valid"),
        RepositoryName::new("widgets").expect("repository should be valid"),
        PullRequestNumber::new(1).expect("number should be valid"),
    );
    assert!(
        matches!(result, Err(TodeyError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}

#[rstest]
#[case::plain("17", 17)]
#[case::padded(" 5\n", 5)]
fn parses_pull_request_numbers(#[case] raw: &str, #[case] expected: u64) {
    let number = PullRequestNumber::parse(raw).expect("number should parse");
    assert_eq!(number.get(), expected);
}

#[rstest]
#[case::zero("0")]
#[case::negative("-3")]
#[case::word("two")]
#[case::blank("")]
fn rejects_invalid_pull_request_numbers(#[case] raw: &str) {
    let result = PullRequestNumber::parse(raw);
    assert!(
        matches!(result, Err(TodeyError::InvalidPullRequestNumber)),
        "expected InvalidPullRequestNumber for {raw:?}, got {result:?}"
    );
}

#[rstest]
fn rejects_blank_identity_parts() {
    assert_eq!(RepositoryOwner::new("  "), Err(TodeyError::MissingOwner));
    assert_eq!(RepositoryName::new(""), Err(TodeyError::MissingRepository));
    assert_eq!(
        PersonalAccessToken::new(" \t"),
        Err(TodeyError::MissingToken)
    );
}

#[rstest]
fn trims_token_whitespace() {
    let token = PersonalAccessToken::new(" ghp_example\n").expect("token should be valid");
    assert_eq!(token.value(), "ghp_example");
}
