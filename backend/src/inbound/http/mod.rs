//! HTTP inbound adapter exposing the REST surface.

pub mod accept;
pub mod auth;
pub mod boats;
pub mod error;
pub mod loads;
pub mod login;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use pagination::Cursor;
use url::Url;

use crate::domain::{EntityId, Error};

/// Resolve a raw boat identifier path segment. Anything that is not a
/// store key cannot name a boat, so the failure is the standard 404.
pub(crate) fn parse_boat_id(raw: &str) -> Result<EntityId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found("No boat with this boat_id exists"))
}

/// Resolve a raw load identifier path segment.
pub(crate) fn parse_load_id(raw: &str) -> Result<EntityId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found("No load with this load_id exists"))
}

/// Validate an optional raw cursor query parameter.
pub(crate) fn parse_cursor(raw: Option<String>) -> Result<Option<Cursor>, Error> {
    raw.map(Cursor::new)
        .transpose()
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Build the absolute next-page link for a listing, when one exists.
pub(crate) fn next_page_link(
    root: &Url,
    path: &str,
    cursor: Option<&Cursor>,
) -> Result<Option<String>, Error> {
    cursor
        .map(|cursor| {
            pagination::next_url(root, path, cursor)
                .map(String::from)
                .map_err(|err| Error::internal(err.to_string()))
        })
        .transpose()
}
