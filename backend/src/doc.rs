//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every REST path and the shared schemas; Swagger UI
//! serves the generated document in debug builds at `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer security scheme used by the boat routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Freight carrier API",
        description = "Boats, loads, and their owner-scoped association."
    ),
    paths(
        crate::inbound::http::login::login_url,
        crate::inbound::http::login::oauth_callback,
        crate::inbound::http::users::list_users,
        crate::inbound::http::boats::list_boats,
        crate::inbound::http::boats::create_boat,
        crate::inbound::http::boats::get_boat,
        crate::inbound::http::boats::update_boat,
        crate::inbound::http::boats::patch_boat,
        crate::inbound::http::boats::delete_boat,
        crate::inbound::http::boats::assign_load,
        crate::inbound::http::boats::release_load,
        crate::inbound::http::loads::list_loads,
        crate::inbound::http::loads::create_load,
        crate::inbound::http::loads::get_load,
        crate::inbound::http::loads::update_load,
        crate::inbound::http::loads::patch_load,
        crate::inbound::http::loads::delete_load,
    ),
    components(schemas(
        crate::domain::Boat,
        crate::domain::Load,
        crate::domain::User,
        crate::domain::LoadSummary,
        crate::domain::CarrierSummary,
        crate::domain::Error,
        crate::domain::ErrorCode,
    ))
)]
pub struct ApiDoc;
