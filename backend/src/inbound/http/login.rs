//! Login flow handlers.
//!
//! ```text
//! GET /login            provider authorization URL for browser login
//! GET /oauth?code=...   provider redirect target: exchange + register
//! ```
//!
//! The exchanged identity token is returned to the caller in the response
//! body and nowhere else; the process keeps no login state between
//! requests.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{Authenticator as _, UserOnboarding as _};
use crate::domain::{Error, Subject};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Authorization URL for starting a browser login.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginUrlBody {
    /// Provider authorization URL including a fresh `state` value.
    pub url: String,
}

/// Query parameters of the provider redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange.
    pub code: String,
}

/// Identity issued by a completed login.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenBody {
    /// Bearer token for the boat routes.
    pub token: String,
    /// Stable subject extracted from the token.
    pub subject: Subject,
}

/// Build the provider authorization URL.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Authorization URL", body = LoginUrlBody)),
    tags = ["login"],
    operation_id = "loginUrl"
)]
#[get("/login")]
pub async fn login_url(state: web::Data<HttpState>) -> ApiResult<web::Json<LoginUrlBody>> {
    let mut url = state.login.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &state.login.client_id)
        .append_pair("redirect_uri", state.login.redirect_uri.as_str())
        .append_pair("scope", "profile")
        .append_pair("state", &Uuid::new_v4().simple().to_string());
    Ok(web::Json(LoginUrlBody {
        url: url.into(),
    }))
}

/// Exchange the authorization code, register the subject, and hand the
/// token back to the caller.
#[utoipa::path(
    get,
    path = "/oauth",
    responses(
        (status = 200, description = "Login completed", body = TokenBody),
        (status = 401, description = "Code exchange failed", body = Error)
    ),
    params(("code" = String, Query, description = "Authorization code from the provider")),
    tags = ["login"],
    operation_id = "oauthCallback"
)]
#[get("/oauth")]
pub async fn oauth_callback(
    state: web::Data<HttpState>,
    query: web::Query<CallbackQuery>,
) -> ApiResult<HttpResponse> {
    let identity = state
        .authenticator
        .exchange_code(&query.code)
        .await
        .map_err(|err| Error::unauthorized(err.to_string()))?;
    state.onboarding.register(identity.subject.clone()).await?;
    Ok(HttpResponse::Ok().json(TokenBody {
        token: identity.token,
        subject: identity.subject,
    }))
}
