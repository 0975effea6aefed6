//! HTTP mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while handlers turn failures
//! into consistent JSON bodies and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header(("trace-id", id.clone()));
        }
        if matches!(self.code, ErrorCode::InternalError) {
            // Do not leak internal failure detail to clients.
            let mut redacted = self.clone();
            redacted.message = "Internal server error".to_owned();
            redacted.details = None;
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to API error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Status mapping and redaction coverage.

    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("no token"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::method_not_allowed("nope"), StatusCode::METHOD_NOT_ALLOWED)]
    #[case(Error::not_acceptable("json only"), StatusCode::NOT_ACCEPTABLE)]
    #[case(Error::conflict("taken"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_matches_error_code(#[case] err: Error, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let err = Error::internal("connection string leaked")
            .with_details(serde_json::json!({ "dsn": "secret" }));
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.expect("readable body");
        let value: Value = serde_json::from_slice(&bytes).expect("JSON body");
        assert_eq!(
            value.get("Error").and_then(Value::as_str),
            Some("Internal server error")
        );
        assert!(value.get("details").is_none());
    }

    #[actix_web::test]
    async fn non_internal_errors_keep_their_message() {
        let err = Error::conflict("The load is already assigned to a boat");
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.expect("readable body");
        let value: Value = serde_json::from_slice(&bytes).expect("JSON body");
        assert_eq!(
            value.get("Error").and_then(Value::as_str),
            Some("The load is already assigned to a boat")
        );
    }

    #[actix_web::test]
    async fn trace_id_is_echoed_as_a_header() {
        let err = Error::not_found("missing").with_trace_id("abc");
        let response = err.error_response();
        let header = response
            .headers()
            .get("trace-id")
            .expect("trace id header")
            .to_str()
            .expect("ascii header");
        assert_eq!(header, "abc");
    }
}
