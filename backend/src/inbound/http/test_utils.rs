//! Shared helpers for handler tests.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{
    FixtureAuthenticator, MockAssignmentCommand, MockBoatCommand, MockBoatQuery, MockLoadCommand,
    MockLoadQuery, MockUserOnboarding, MockUsersQuery,
};
use crate::inbound::http::state::{HttpState, LoginSettings};

/// Mutable port mocks for one test; configure expectations, then build the
/// state with [`state_from`]. Unconfigured mocks panic when called, which
/// keeps handler interactions explicit.
#[derive(Default)]
pub struct TestPorts {
    pub boats: MockBoatCommand,
    pub boats_query: MockBoatQuery,
    pub loads: MockLoadCommand,
    pub loads_query: MockLoadQuery,
    pub assignments: MockAssignmentCommand,
    pub users: MockUsersQuery,
    pub onboarding: MockUserOnboarding,
}

/// Wrap configured mocks into handler state. The fixture authenticator
/// treats the bearer token as the subject, so tests authenticate with
/// `Authorization: Bearer <subject>`.
pub fn state_from(ports: TestPorts) -> HttpState {
    let root_url = Url::parse("https://freight.example.com").expect("valid test root");
    HttpState {
        boats: Arc::new(ports.boats),
        boats_query: Arc::new(ports.boats_query),
        loads: Arc::new(ports.loads),
        loads_query: Arc::new(ports.loads_query),
        assignments: Arc::new(ports.assignments),
        users: Arc::new(ports.users),
        onboarding: Arc::new(ports.onboarding),
        authenticator: Arc::new(FixtureAuthenticator),
        login: LoginSettings {
            auth_url: Url::parse("https://accounts.google.com/o/oauth2/v2/auth")
                .expect("valid test auth url"),
            client_id: "client-1".to_owned(),
            redirect_uri: Url::parse("https://freight.example.com/oauth")
                .expect("valid test redirect"),
        },
        root_url,
    }
}
