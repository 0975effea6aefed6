//! `Accept` header negotiation for JSON-producing endpoints.
//!
//! A missing header accepts anything; a present header must admit JSON.

use actix_web::HttpRequest;
use actix_web::http::header;

use crate::domain::Error;

/// Message returned when negotiation fails, kept stable for clients.
pub const NOT_ACCEPTABLE_MESSAGE: &str =
    "Application/JSON data not specified as acceptable in header";

fn admits_json(raw: &str) -> bool {
    raw.split(',')
        .filter_map(|part| part.split(';').next())
        .map(str::trim)
        .any(|media_type| {
            media_type.eq_ignore_ascii_case("application/json")
                || media_type.eq_ignore_ascii_case("application/*")
                || media_type == "*/*"
        })
}

/// Reject the request with `NotAcceptable` unless the caller admits a JSON
/// response.
pub fn require_json(req: &HttpRequest) -> Result<(), Error> {
    let Some(accept) = req.headers().get(header::ACCEPT) else {
        return Ok(());
    };
    let raw = accept
        .to_str()
        .map_err(|_| Error::not_acceptable(NOT_ACCEPTABLE_MESSAGE))?;
    if admits_json(raw) {
        Ok(())
    } else {
        Err(Error::not_acceptable(NOT_ACCEPTABLE_MESSAGE))
    }
}
