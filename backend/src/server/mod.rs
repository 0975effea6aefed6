//! Service wiring: state construction, route registration, and the HTTP
//! server run loop.

pub mod config;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;
use url::Url;
#[cfg(debug_assertions)]
use utoipa::OpenApi as _;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::ports::{
    AssignmentCommand, Authenticator, BoatCommand, BoatQuery, LoadCommand, LoadQuery,
    UserOnboarding, UsersQuery,
};
use crate::domain::{
    AssignmentService, BoatService, EntityLocks, Error, LoadService, UserService,
};
use crate::inbound::http::state::{HttpState, LoginSettings};
use crate::inbound::http::{boats, loads, login, users};
use crate::middleware::Trace;
use crate::outbound::oauth::{GoogleAuthenticator, OAuthProviderConfig};
use crate::outbound::persistence::{
    DatastoreBoatRepository, DatastoreLoadRepository, DatastoreUserRepository, MemoryDatastore,
    ResourceLinks,
};
use self::config::AppConfig;

fn bootstrap_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

fn parse_url(context: &str, raw: &str) -> std::io::Result<Url> {
    Url::parse(raw).map_err(|err| bootstrap_error(context, err))
}

/// Build handler state from configuration: in-memory document store,
/// repository adapters, domain services, and the provider authenticator.
pub fn build_state(config: &AppConfig) -> std::io::Result<HttpState> {
    let root_url = parse_url("root_url", config.root_url())?;
    let auth_url = parse_url("oauth_auth_url", config.oauth_auth_url())?;
    let token_url = parse_url("oauth_token_url", config.oauth_token_url())?;
    let redirect_uri = parse_url("oauth_redirect_uri", &config.oauth_redirect_uri())?;

    let links = ResourceLinks::new(root_url.clone());
    let store = Arc::new(MemoryDatastore::new());
    let boat_repo = Arc::new(DatastoreBoatRepository::new(
        Arc::clone(&store),
        links.clone(),
    ));
    let load_repo = Arc::new(DatastoreLoadRepository::new(Arc::clone(&store), links));
    let user_repo = Arc::new(DatastoreUserRepository::new(Arc::clone(&store)));
    let locks = EntityLocks::new();

    let boat_service = Arc::new(BoatService::new(
        Arc::clone(&boat_repo),
        Arc::clone(&load_repo),
        Arc::clone(&locks),
        config.page_size(),
    ));
    let load_service = Arc::new(LoadService::new(
        Arc::clone(&boat_repo),
        Arc::clone(&load_repo),
        Arc::clone(&locks),
        config.page_size(),
    ));
    let assignment_service = Arc::new(AssignmentService::new(boat_repo, load_repo, locks));
    let user_service = Arc::new(UserService::new(user_repo));

    let authenticator = Arc::new(GoogleAuthenticator::new(OAuthProviderConfig {
        client_id: config.oauth_client_id().to_owned(),
        client_secret: config.oauth_client_secret().to_owned(),
        token_url,
        auth_url: auth_url.clone(),
        redirect_uri: redirect_uri.clone(),
        issuer: config.oauth_issuer().to_owned(),
    }));

    let boats: Arc<dyn BoatCommand> = boat_service.clone();
    let boats_query: Arc<dyn BoatQuery> = boat_service;
    let load_commands: Arc<dyn LoadCommand> = load_service.clone();
    let loads_query: Arc<dyn LoadQuery> = load_service;
    let assignments: Arc<dyn AssignmentCommand> = assignment_service;
    let users_query: Arc<dyn UsersQuery> = user_service.clone();
    let onboarding: Arc<dyn UserOnboarding> = user_service;
    let auth: Arc<dyn Authenticator> = authenticator;

    Ok(HttpState {
        boats,
        boats_query,
        loads: load_commands,
        loads_query,
        assignments,
        users: users_query,
        onboarding,
        authenticator: auth,
        root_url,
        login: LoginSettings {
            auth_url,
            client_id: config.oauth_client_id().to_owned(),
            redirect_uri,
        },
    })
}

/// Register every route of the REST surface.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(login::login_url)
        .service(login::oauth_callback)
        .service(users::resource())
        .service(boats::list_boats)
        .service(boats::create_boat)
        .service(boats::assign_load)
        .service(boats::release_load)
        .service(boats::get_boat)
        .service(boats::update_boat)
        .service(boats::patch_boat)
        .service(boats::delete_boat)
        .service(loads::list_loads)
        .service(loads::create_load)
        .service(loads::get_load)
        .service(loads::update_load)
        .service(loads::patch_load)
        .service(loads::delete_load);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}

/// Run the HTTP server until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let state = web::Data::new(build_state(&config)?);
    let bind_addr = config.bind_addr().to_owned();
    info!(bind_addr = %bind_addr, "starting freight backend");

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(json_config())
            .wrap(Trace)
            .configure(configure_api);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::doc::ApiDoc::openapi()),
        );
        app
    })
    .bind(bind_addr.as_str())?;

    server.run().await
}

#[cfg(test)]
mod tests {
    //! Wiring smoke coverage over the real in-memory stack.

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            bind_addr: None,
            root_url: Some("https://freight.example.com".to_owned()),
            page_size: None,
            oauth_client_id: Some("client-1".to_owned()),
            oauth_client_secret: Some("secret".to_owned()),
            oauth_auth_url: None,
            oauth_token_url: None,
            oauth_redirect_uri: None,
            oauth_issuer: None,
        }
    }

    #[actix_web::test]
    async fn wired_app_serves_the_load_surface() {
        let state = build_state(&test_config()).expect("state builds");
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .configure(configure_api),
        )
        .await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/loads")
                .set_json(json!({ "weight": 500, "content": "steel", "delivery_date": "2024-01-01" }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(created).await;
        let self_link = body["self"].as_str().expect("self link");
        assert!(self_link.starts_with("https://freight.example.com/loads/"));

        let listed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/loads")
                .insert_header((header::ACCEPT, "application/json"))
                .to_request(),
        )
        .await;
        assert_eq!(listed.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_json_maps_to_the_error_contract() {
        let state = build_state(&test_config()).expect("state builds");
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .configure(configure_api),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/loads")
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .set_payload("{ not json")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert!(body.get("Error").is_some());
    }
}
