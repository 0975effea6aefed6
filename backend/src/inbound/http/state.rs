//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` and depend only on the
//! domain ports, so they stay testable without real storage or a real
//! identity provider.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{
    AssignmentCommand, Authenticator, BoatCommand, BoatQuery, LoadCommand, LoadQuery,
    UserOnboarding, UsersQuery,
};

/// Settings for building provider login URLs.
#[derive(Debug, Clone)]
pub struct LoginSettings {
    /// Provider authorization endpoint.
    pub auth_url: Url,
    /// OAuth2 client identifier.
    pub client_id: String,
    /// Redirect URI registered with the provider.
    pub redirect_uri: Url,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Boat mutations.
    pub boats: Arc<dyn BoatCommand>,
    /// Boat reads.
    pub boats_query: Arc<dyn BoatQuery>,
    /// Load mutations.
    pub loads: Arc<dyn LoadCommand>,
    /// Load reads.
    pub loads_query: Arc<dyn LoadQuery>,
    /// Boat/load association mutations.
    pub assignments: Arc<dyn AssignmentCommand>,
    /// Read-only user listing.
    pub users: Arc<dyn UsersQuery>,
    /// First-login registration.
    pub onboarding: Arc<dyn UserOnboarding>,
    /// Bearer verification and code exchange.
    pub authenticator: Arc<dyn Authenticator>,
    /// Public root URL for pagination links.
    pub root_url: Url,
    /// Provider login settings.
    pub login: LoginSettings,
}
