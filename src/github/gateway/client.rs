//! Octocrab client construction for the gateway.

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::TodeyError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::{Operation, map_octocrab_error};

/// Converts the configured API base into the URI Octocrab prefixes onto every
/// request path.
///
/// The trailing `/` that [`Url`] adds to an empty path is dropped so that
/// `/repos/...` is not joined as `//repos/...`.
pub(super) fn base_uri_for(api_base: &Url) -> Result<Uri, TodeyError> {
    api_base
        .as_str()
        .trim_end_matches('/')
        .parse::<Uri>()
        .map_err(|error| TodeyError::InvalidUrl(format!("{api_base}: {error}")))
}

/// Builds an Octocrab client authenticated with `token` against `api_base`.
///
/// # Errors
///
/// Returns `TodeyError::InvalidUrl` when the base cannot be used as a URI or
/// `TodeyError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &Url,
) -> Result<Octocrab, TodeyError> {
    let base_uri = base_uri_for(api_base)?;
    tracing::debug!(%base_uri, "building GitHub client");

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| map_octocrab_error(Operation::BuildClient, &error))?
        .build()
        .map_err(|error| map_octocrab_error(Operation::BuildClient, &error))
}
