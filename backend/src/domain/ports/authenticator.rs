//! Port abstraction for the external identity provider.
//!
//! The provider is opaque to the core: it exchanges an authorization code
//! for an identity token and extracts a stable subject from bearer tokens.
//! Tokens are request-scoped values returned to the caller; nothing in the
//! process retains them.

use async_trait::async_trait;

use crate::domain::subject::Subject;

/// Errors raised by authenticator adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticatorError {
    /// The code exchange with the provider failed.
    #[error("authorization code exchange failed: {message}")]
    Exchange {
        /// Provider-supplied failure description.
        message: String,
    },
    /// The presented token was missing, malformed, or failed a claim check.
    #[error("identity token rejected: {message}")]
    InvalidToken {
        /// Reason the token was rejected.
        message: String,
    },
}

impl AuthenticatorError {
    /// Exchange failure with the given description.
    pub fn exchange(message: impl Into<String>) -> Self {
        Self::Exchange {
            message: message.into(),
        }
    }

    /// Token rejection with the given reason.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }
}

/// An identity token issued by the provider together with the subject
/// extracted from its claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityToken {
    /// Raw bearer token, returned to the caller verbatim.
    pub token: String,
    /// Stable subject claim.
    pub subject: Subject,
}

/// Port for identity exchange and bearer verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange an authorization code for an identity token.
    async fn exchange_code(&self, code: &str) -> Result<IdentityToken, AuthenticatorError>;

    /// Extract the subject from a bearer token presented on a request.
    async fn verify_bearer(&self, token: &str) -> Result<Subject, AuthenticatorError>;
}

/// Fixture authenticator: treats the bearer token itself as the subject.
/// Handler tests authenticate with `Authorization: Bearer <subject>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthenticator;

#[async_trait]
impl Authenticator for FixtureAuthenticator {
    async fn exchange_code(&self, code: &str) -> Result<IdentityToken, AuthenticatorError> {
        let subject = Subject::new(code)
            .map_err(|err| AuthenticatorError::exchange(err.to_string()))?;
        Ok(IdentityToken {
            token: code.to_owned(),
            subject,
        })
    }

    async fn verify_bearer(&self, token: &str) -> Result<Subject, AuthenticatorError> {
        Subject::new(token).map_err(|err| AuthenticatorError::invalid_token(err.to_string()))
    }
}
