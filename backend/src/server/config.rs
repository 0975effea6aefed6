//! Application configuration loaded via OrthoConfig.
//!
//! Every field can come from CLI flags, a configuration file, or `FREIGHT_*`
//! environment variables; unset fields fall back through the accessors.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ROOT_URL: &str = "http://localhost:8080";
const DEFAULT_PAGE_SIZE: usize = 5;
const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_ISSUER: &str = "https://accounts.google.com";

/// Configuration values controlling the HTTP service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FREIGHT")]
pub struct AppConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Public root URL used in `self` and pagination links.
    pub root_url: Option<String>,
    /// Listing page size.
    pub page_size: Option<usize>,
    /// OAuth2 client identifier.
    pub oauth_client_id: Option<String>,
    /// OAuth2 client secret.
    pub oauth_client_secret: Option<String>,
    /// Provider authorization endpoint.
    pub oauth_auth_url: Option<String>,
    /// Provider token endpoint.
    pub oauth_token_url: Option<String>,
    /// Redirect URI registered with the provider; defaults to
    /// `<root_url>/oauth`.
    pub oauth_redirect_uri: Option<String>,
    /// Expected identity token issuer.
    pub oauth_issuer: Option<String>,
}

impl AppConfig {
    /// Socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Public root URL for links.
    #[must_use]
    pub fn root_url(&self) -> &str {
        self.root_url.as_deref().unwrap_or(DEFAULT_ROOT_URL)
    }

    /// Listing page size.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// OAuth2 client identifier; empty when not configured.
    #[must_use]
    pub fn oauth_client_id(&self) -> &str {
        self.oauth_client_id.as_deref().unwrap_or_default()
    }

    /// OAuth2 client secret; empty when not configured.
    #[must_use]
    pub fn oauth_client_secret(&self) -> &str {
        self.oauth_client_secret.as_deref().unwrap_or_default()
    }

    /// Provider authorization endpoint.
    #[must_use]
    pub fn oauth_auth_url(&self) -> &str {
        self.oauth_auth_url.as_deref().unwrap_or(DEFAULT_AUTH_URL)
    }

    /// Provider token endpoint.
    #[must_use]
    pub fn oauth_token_url(&self) -> &str {
        self.oauth_token_url.as_deref().unwrap_or(DEFAULT_TOKEN_URL)
    }

    /// Redirect URI registered with the provider.
    #[must_use]
    pub fn oauth_redirect_uri(&self) -> String {
        self.oauth_redirect_uri.clone().unwrap_or_else(|| {
            format!("{}/oauth", self.root_url().trim_end_matches('/'))
        })
    }

    /// Expected identity token issuer.
    #[must_use]
    pub fn oauth_issuer(&self) -> &str {
        self.oauth_issuer.as_deref().unwrap_or(DEFAULT_ISSUER)
    }
}

#[cfg(test)]
mod tests {
    //! Accessor fallback coverage; environment layering belongs to the
    //! configuration crate itself.

    use rstest::rstest;

    use super::*;

    fn empty() -> AppConfig {
        AppConfig {
            bind_addr: None,
            root_url: None,
            page_size: None,
            oauth_client_id: None,
            oauth_client_secret: None,
            oauth_auth_url: None,
            oauth_token_url: None,
            oauth_redirect_uri: None,
            oauth_issuer: None,
        }
    }

    #[rstest]
    fn defaults_cover_every_accessor() {
        let config = empty();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.root_url(), "http://localhost:8080");
        assert_eq!(config.page_size(), 5);
        assert_eq!(config.oauth_redirect_uri(), "http://localhost:8080/oauth");
        assert_eq!(config.oauth_issuer(), "https://accounts.google.com");
        assert!(config.oauth_client_id().is_empty());
    }

    #[rstest]
    fn explicit_values_win() {
        let config = AppConfig {
            bind_addr: Some("127.0.0.1:9000".to_owned()),
            root_url: Some("https://freight.example.com/".to_owned()),
            page_size: Some(10),
            oauth_redirect_uri: None,
            ..empty()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.page_size(), 10);
        assert_eq!(
            config.oauth_redirect_uri(),
            "https://freight.example.com/oauth"
        );
    }
}
