//! Bearer-subject extraction for owner-scoped routes.
//!
//! The extractor reads the `Authorization: Bearer` header and delegates to
//! the authenticator port, so handlers receive a verified [`Subject`] and
//! never see raw tokens. Routes without this extractor perform no
//! authentication.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::Authenticator as _;
use crate::domain::{Error, Subject};
use crate::inbound::http::state::HttpState;

/// Verified caller identity for the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject(Subject);

impl AuthenticatedSubject {
    /// The verified subject.
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.0
    }

    /// Consume the extractor, yielding the subject.
    #[must_use]
    pub fn into_inner(self) -> Subject {
        self.0
    }
}

fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequest for AuthenticatedSubject {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| bearer_token(Some(raw)))
            .map(ToOwned::to_owned);

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("authenticator state is not configured"))?;
            let token =
                token.ok_or_else(|| Error::unauthorized("bearer token required"))?;
            let subject = state
                .authenticator
                .verify_bearer(&token)
                .await
                .map_err(|err| Error::unauthorized(err.to_string()))?;
            Ok(Self(subject))
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    use super::*;
    use crate::inbound::http::test_utils::{TestPorts, state_from};

    fn protected_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state_from(TestPorts::default())))
            .route(
                "/whoami",
                web::get().to(|caller: AuthenticatedSubject| async move {
                    HttpResponse::Ok().body(caller.into_inner().to_string())
                }),
            )
    }

    #[actix_web::test]
    async fn bearer_subject_reaches_the_handler() {
        let app = actix_test::init_service(protected_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .insert_header((header::AUTHORIZATION, "Bearer u1"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "u1");
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let app = actix_test::init_service(protected_app()).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let app = actix_test::init_service(protected_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bearer_token_parsing_is_scheme_insensitive() {
        assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(Some("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(Some("Basic abc")), None);
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(None), None);
    }
}
