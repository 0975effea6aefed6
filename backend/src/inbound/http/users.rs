//! Users API handlers.
//!
//! ```text
//! GET /users    list registered users (read-only)
//! ```
//!
//! Every other verb on the collection answers 405 with an `Allow: GET`
//! header, matching the published contract.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::domain::ports::UsersQuery as _;
use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accept::require_json;
use crate::inbound::http::state::HttpState;

/// The registered users.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserListBody {
    /// Every registered user.
    pub items: Vec<User>,
}

/// List registered users.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Registered users", body = UserListBody),
        (status = 406, description = "JSON not acceptable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
pub async fn list_users(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let items = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(UserListBody { items }))
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "GET"))
        .json(Error::method_not_allowed(
            "Only GET is supported on the users collection",
        ))
}

/// The `/users` resource: GET lists, everything else is 405.
pub fn resource() -> actix_web::Resource {
    web::resource("/users")
        .route(web::get().to(list_users))
        .default_service(web::route().to(method_not_allowed))
}
