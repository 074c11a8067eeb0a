//! Tests for the Octocrab gateway against a mock GitHub API.

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

use http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{OctocrabGateway, PublishGateway, PullRequestGateway};
use crate::github::error::TodeyError;
use crate::github::locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName, RepositoryOwner,
};
use crate::github::models::{ChangedFile, PublishOutcome};

const FILES_PATH: &str = "/api/v3/repos/owner/repo/pulls/42/files";
const COMMENTS_PATH: &str = "/api/v3/repos/owner/repo/issues/42/comments";
const PULL_PATH: &str = "/api/v3/repos/owner/repo/pulls/42";

struct GatewayFixture {
    runtime: Runtime,
    server: MockServer,
    locator: PullRequestLocator,
    gateway: OctocrabGateway,
}

impl GatewayFixture {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn mount(&self, mock: Mock) {
        self.block_on(mock.mount(&self.server));
    }
}

#[fixture]
fn gateway_fixture() -> FixtureResult<GatewayFixture> {
    let token = PersonalAccessToken::new("valid-token")?;
    let runtime = Runtime::new()?;
    let server = runtime.block_on(MockServer::start());
    let locator = PullRequestLocator::new(
        &format!("{}/api/v3", server.uri()),
        RepositoryOwner::new("owner")?,
        RepositoryName::new("repo")?,
        PullRequestNumber::new(42)?,
    )?;
    let gateway = {
        let _guard = runtime.enter();
        OctocrabGateway::for_token(&token, &locator)?
    };
    Ok(GatewayFixture {
        runtime,
        server,
        locator,
        gateway,
    })
}

#[rstest]
fn changed_files_skips_removed_entries(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(FILES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "filename": "a.py", "status": "modified", "additions": 1 },
                { "filename": "b.py", "status": "removed", "deletions": 9 }
            ]))),
    );

    let files = fixture
        .block_on(fixture.gateway.changed_files(&fixture.locator))
        .expect("listing should succeed");

    assert_eq!(files, vec![ChangedFile::new("a.py")]);
}

#[rstest]
fn changed_files_keeps_listing_order(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(FILES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "filename": "z.rs", "status": "added" },
                { "filename": "src/a.rs", "status": "renamed" },
                { "filename": "m.rs", "status": "modified" }
            ]))),
    );

    let files = fixture
        .block_on(fixture.gateway.changed_files(&fixture.locator))
        .expect("listing should succeed");

    let names: Vec<&str> = files.iter().map(ChangedFile::as_str).collect();
    assert_eq!(names, ["z.rs", "src/a.rs", "m.rs"]);
}

#[rstest]
fn changed_files_returns_empty_list(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(FILES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );

    let files = fixture
        .block_on(fixture.gateway.changed_files(&fixture.locator))
        .expect("empty listing is not an error");

    assert!(files.is_empty());
}

#[rstest]
fn changed_files_maps_rejected_token(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(FILES_PATH))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
            ),
    );

    let result = fixture.block_on(fixture.gateway.changed_files(&fixture.locator));

    assert!(
        matches!(&result, Err(TodeyError::Authentication { message }) if message.contains("Bad credentials")),
        "expected Authentication error, got {result:?}"
    );
}

#[rstest]
fn changed_files_rejects_malformed_listing(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(FILES_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "path": "no-filename.py" }])),
            ),
    );

    let result = fixture.block_on(fixture.gateway.changed_files(&fixture.locator));

    assert!(
        matches!(&result, Err(error) if error.is_transport()),
        "expected a transport error, got {result:?}"
    );
}

#[rstest]
fn file_content_decodes_branch_content(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/contents/src/app.py"))
            .and(query_param("ref", "feature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "app.py",
                "path": "src/app.py",
                "encoding": "base64",
                "content": "YQpiCiMgVE9ETyE6IGZp\neCBidWcKYw==\n"
            }))),
    );

    let text = fixture
        .block_on(fixture.gateway.file_content(
            &fixture.locator,
            &ChangedFile::new("src/app.py"),
            "feature",
        ))
        .expect("content should load");

    assert_eq!(text, "a\nb\n# TODO!: fix bug\nc");
}

#[rstest]
fn file_content_percent_encodes_path_segments(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/contents/docs/release%20notes.md"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "encoding": "base64",
                "content": "IyBUT0RPITogc2hpcAo="
            }))),
    );

    let text = fixture
        .block_on(fixture.gateway.file_content(
            &fixture.locator,
            &ChangedFile::new("docs/release notes.md"),
            "main",
        ))
        .expect("content should load");

    assert_eq!(text, "# TODO!: ship\n");
}

#[rstest]
fn file_content_surfaces_decode_errors(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/contents/logo.png"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "encoding": "base64",
                "content": "//79"
            }))),
    );

    let result = fixture.block_on(fixture.gateway.file_content(
        &fixture.locator,
        &ChangedFile::new("logo.png"),
        "main",
    ));

    assert!(
        matches!(&result, Err(TodeyError::Decode { path, .. }) if path == "logo.png"),
        "expected Decode error, got {result:?}"
    );
}

#[rstest]
fn file_content_treats_oversized_file_as_empty(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/contents/package-lock.json"))
            .and(query_param("ref", "main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "encoding": "none",
                "content": "",
                "size": 2_000_000
            }))),
    );

    let text = fixture
        .block_on(fixture.gateway.file_content(
            &fixture.locator,
            &ChangedFile::new("package-lock.json"),
            "main",
        ))
        .expect("oversized file should not abort the scan");

    assert!(text.is_empty(), "expected empty text, got {text:?}");
}

#[rstest]
fn file_content_maps_missing_file(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/contents/gone.py"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" }))),
    );

    let result = fixture.block_on(fixture.gateway.file_content(
        &fixture.locator,
        &ChangedFile::new("gone.py"),
        "main",
    ));

    assert!(
        matches!(&result, Err(TodeyError::Api { message }) if message.contains("404")),
        "expected Api error mentioning 404, got {result:?}"
    );
}

#[rstest]
fn create_comment_reports_created(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("POST"))
            .and(path(COMMENTS_PATH))
            .and(body_json(json!({ "body": "report" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7 })))
            .expect(1),
    );

    let outcome = fixture
        .block_on(fixture.gateway.create_comment(&fixture.locator, "report"))
        .expect("post should reach GitHub");

    assert_eq!(outcome, PublishOutcome::Success);
    fixture.block_on(fixture.server.verify());
}

#[rstest]
#[case::forbidden(403, StatusCode::FORBIDDEN)]
#[case::unprocessable(422, StatusCode::UNPROCESSABLE_ENTITY)]
#[case::ok_is_not_created(200, StatusCode::OK)]
fn create_comment_reports_other_statuses_as_failure(
    gateway_fixture: FixtureResult<GatewayFixture>,
    #[case] raw_status: u16,
    #[case] expected: StatusCode,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("POST"))
            .and(path(COMMENTS_PATH))
            .respond_with(
                ResponseTemplate::new(raw_status)
                    .set_body_json(json!({ "message": "Resource not accessible by integration" })),
            ),
    );

    let outcome = fixture
        .block_on(fixture.gateway.create_comment(&fixture.locator, "report"))
        .expect("a status response is not an error");

    assert_eq!(outcome, PublishOutcome::Failure(expected));
}

#[rstest]
fn update_description_patches_pull_request(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("PATCH"))
            .and(path(PULL_PATH))
            .and(body_json(json!({ "body": "new description" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 42 })))
            .expect(1),
    );

    let outcome = fixture
        .block_on(
            fixture
                .gateway
                .update_description(&fixture.locator, "new description"),
        )
        .expect("patch should reach GitHub");

    assert_eq!(outcome, PublishOutcome::Success);
    fixture.block_on(fixture.server.verify());
}

#[rstest]
#[case::unprocessable(422, StatusCode::UNPROCESSABLE_ENTITY)]
#[case::forbidden(403, StatusCode::FORBIDDEN)]
#[case::created_is_not_ok(201, StatusCode::CREATED)]
fn update_description_reports_other_statuses_as_failure(
    gateway_fixture: FixtureResult<GatewayFixture>,
    #[case] raw_status: u16,
    #[case] expected: StatusCode,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("PATCH"))
            .and(path(PULL_PATH))
            .respond_with(
                ResponseTemplate::new(raw_status)
                    .set_body_json(json!({ "message": "Validation Failed" })),
            ),
    );

    let outcome = fixture
        .block_on(
            fixture
                .gateway
                .update_description(&fixture.locator, "new description"),
        )
        .expect("a status response is not an error");

    assert_eq!(outcome, PublishOutcome::Failure(expected));
}
