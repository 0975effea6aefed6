//! Google OAuth2 adapter for the authenticator port.
//!
//! Exchanges an authorization code for an identity token at the provider
//! token endpoint and extracts the stable `sub` claim. Bearer tokens are
//! checked for issuer, audience, and expiry; signature verification is
//! performed upstream by the deployment's token-verifying proxy, so this
//! adapter never fetches provider keys.
//!
//! Tokens are returned to the caller and never retained in process state.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

use crate::domain::Subject;
use crate::domain::ports::{Authenticator, AuthenticatorError, IdentityToken};

/// Provider endpoints and client credentials.
#[derive(Debug, Clone)]
pub struct OAuthProviderConfig {
    /// OAuth2 client identifier; also the expected token audience.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// Token endpoint for the authorization-code exchange.
    pub token_url: Url,
    /// Authorization endpoint for building login URLs.
    pub auth_url: Url,
    /// Redirect URI registered with the provider.
    pub redirect_uri: Url,
    /// Expected `iss` claim, with or without the scheme prefix.
    pub issuer: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct IdentityClaims {
    sub: String,
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    aud: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

fn decode_claims(token: &str) -> Result<IdentityClaims, AuthenticatorError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthenticatorError::invalid_token("token is not a JWT"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthenticatorError::invalid_token("token payload is not base64"))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| AuthenticatorError::invalid_token(format!("token claims: {err}")))
}

fn strip_scheme(issuer: &str) -> &str {
    issuer.trim_start_matches("https://")
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
}

/// Google-backed implementation of the authenticator port.
#[derive(Clone)]
pub struct GoogleAuthenticator {
    http: reqwest::Client,
    config: OAuthProviderConfig,
}

impl GoogleAuthenticator {
    /// Create the adapter with a fresh HTTP client.
    #[must_use]
    pub fn new(config: OAuthProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn verify_claims(&self, claims: &IdentityClaims) -> Result<(), AuthenticatorError> {
        match claims.iss.as_deref() {
            Some(iss) if strip_scheme(iss) == strip_scheme(&self.config.issuer) => {}
            Some(iss) => {
                return Err(AuthenticatorError::invalid_token(format!(
                    "unexpected issuer {iss}"
                )));
            }
            None => {
                return Err(AuthenticatorError::invalid_token("missing issuer claim"));
            }
        }
        match claims.aud.as_deref() {
            Some(aud) if aud == self.config.client_id => {}
            Some(_) => {
                return Err(AuthenticatorError::invalid_token(
                    "token audience is not this client",
                ));
            }
            None => {
                return Err(AuthenticatorError::invalid_token("missing audience claim"));
            }
        }
        match claims.exp {
            Some(exp) if exp > now_unix() => Ok(()),
            Some(_) => Err(AuthenticatorError::invalid_token("token has expired")),
            None => Err(AuthenticatorError::invalid_token("missing expiry claim")),
        }
    }
}

#[async_trait]
impl Authenticator for GoogleAuthenticator {
    async fn exchange_code(&self, code: &str) -> Result<IdentityToken, AuthenticatorError> {
        let response = self
            .http
            .post(self.config.token_url.clone())
            .json(&json!({
                "code": code,
                "client_id": self.config.client_id,
                "client_secret": self.config.client_secret,
                "redirect_uri": self.config.redirect_uri.as_str(),
                "grant_type": "authorization_code",
            }))
            .send()
            .await
            .map_err(|err| AuthenticatorError::exchange(err.to_string()))?
            .error_for_status()
            .map_err(|err| AuthenticatorError::exchange(err.to_string()))?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| AuthenticatorError::exchange(err.to_string()))?;

        // The token arrived straight from the provider over TLS; only the
        // subject claim is needed here.
        let claims = decode_claims(&token.id_token)?;
        let subject = Subject::new(claims.sub)
            .map_err(|err| AuthenticatorError::invalid_token(err.to_string()))?;
        Ok(IdentityToken {
            token: token.id_token,
            subject,
        })
    }

    async fn verify_bearer(&self, token: &str) -> Result<Subject, AuthenticatorError> {
        let claims = decode_claims(token)?;
        self.verify_claims(&claims)?;
        Subject::new(claims.sub).map_err(|err| AuthenticatorError::invalid_token(err.to_string()))
    }
}
