//! Boat API handlers.
//!
//! ```text
//! GET    /boats                         list the caller's boats (paged)
//! POST   /boats                         create a boat
//! GET    /boats/{boat_id}               read one boat
//! PUT    /boats/{boat_id}               replace payload fields
//! PATCH  /boats/{boat_id}               replace supplied fields
//! DELETE /boats/{boat_id}               delete, cascade-detaching loads
//! PUT    /boats/{boat_id}/loads/{load_id}    put a load on the boat
//! DELETE /boats/{boat_id}/loads/{load_id}    take a load off the boat
//! ```
//!
//! Every route requires a bearer subject. Routes that produce a body
//! negotiate a JSON response; the deletes and the two association routes
//! answer 204 and skip negotiation.

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{
    AssignmentCommand as _, AssignmentRequest, BoatCommand as _, BoatQuery as _,
    CreateBoatRequest, DeleteBoatRequest, GetBoatRequest, ListBoatsRequest, PatchBoatRequest,
    UpdateBoatRequest,
};
use crate::domain::{Boat, BoatDraft, Error};
use crate::inbound::http::accept::require_json;
use crate::inbound::http::auth::AuthenticatedSubject;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, next_page_link, parse_boat_id, parse_cursor, parse_load_id};

/// Boat payload for create and full update.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BoatBody {
    /// Boat name.
    pub name: String,
    /// Boat type, e.g. `"tug"`.
    #[serde(rename = "type")]
    pub boat_type: String,
    /// Boat length in feet.
    pub length: i64,
}

impl TryFrom<BoatBody> for BoatDraft {
    type Error = Error;

    fn try_from(body: BoatBody) -> Result<Self, Self::Error> {
        BoatDraft::new(body.name, body.boat_type, body.length)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Boat payload for partial update; omitted fields keep their value.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BoatPatchBody {
    /// Replacement name, when supplied.
    pub name: Option<String>,
    /// Replacement type, when supplied.
    #[serde(rename = "type")]
    pub boat_type: Option<String>,
    /// Replacement length, when supplied.
    pub length: Option<i64>,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Continuation token from a previous page.
    pub cursor: Option<String>,
}

/// One page of the caller's boats.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BoatListBody {
    /// Boats on this page.
    pub items: Vec<Boat>,
    /// Total number of boats the caller owns.
    #[serde(rename = "totalRecords")]
    pub total_records: usize,
    /// Absolute URL of the next page, when more results exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// List the caller's boats, five per page.
#[utoipa::path(
    get,
    path = "/boats",
    responses(
        (status = 200, description = "One page of the caller's boats", body = BoatListBody),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 406, description = "JSON not acceptable", body = Error)
    ),
    params(("cursor" = Option<String>, Query, description = "Opaque continuation token")),
    security(("BearerToken" = [])),
    tags = ["boats"],
    operation_id = "listBoats"
)]
#[get("/boats")]
pub async fn list_boats(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let cursor = parse_cursor(query.into_inner().cursor)?;
    let page = state
        .boats_query
        .list_boats(ListBoatsRequest {
            owner: caller.into_inner(),
            cursor,
        })
        .await?;
    let next = next_page_link(&state.root_url, "/boats", page.next_cursor.as_ref())?;
    Ok(HttpResponse::Ok().json(BoatListBody {
        items: page.items,
        total_records: page.total,
        next,
    }))
}

/// Create a boat owned by the caller.
#[utoipa::path(
    post,
    path = "/boats",
    request_body = BoatBody,
    responses(
        (status = 201, description = "Boat created", body = Boat),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 406, description = "JSON not acceptable", body = Error)
    ),
    security(("BearerToken" = [])),
    tags = ["boats"],
    operation_id = "createBoat"
)]
#[post("/boats")]
pub async fn create_boat(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    req: HttpRequest,
    body: web::Json<BoatBody>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let draft = BoatDraft::try_from(body.into_inner())?;
    let boat = state
        .boats
        .create_boat(CreateBoatRequest {
            draft,
            owner: caller.into_inner(),
        })
        .await?;
    Ok(HttpResponse::Created().json(boat))
}

/// Read one of the caller's boats.
#[utoipa::path(
    get,
    path = "/boats/{boat_id}",
    responses(
        (status = 200, description = "The boat", body = Boat),
        (status = 403, description = "Caller does not own this boat", body = Error),
        (status = 404, description = "No such boat", body = Error)
    ),
    params(("boat_id" = String, Path, description = "Boat identifier")),
    security(("BearerToken" = [])),
    tags = ["boats"],
    operation_id = "getBoat"
)]
#[get("/boats/{boat_id}")]
pub async fn get_boat(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let boat = state
        .boats_query
        .get_boat(GetBoatRequest {
            boat_id: parse_boat_id(&path.into_inner())?,
            caller: caller.into_inner(),
        })
        .await?;
    Ok(HttpResponse::Ok().json(boat))
}

/// Replace every payload field of one of the caller's boats.
#[utoipa::path(
    put,
    path = "/boats/{boat_id}",
    request_body = BoatBody,
    responses(
        (status = 200, description = "The updated boat", body = Boat),
        (status = 403, description = "Caller does not own this boat", body = Error),
        (status = 404, description = "No such boat", body = Error)
    ),
    params(("boat_id" = String, Path, description = "Boat identifier")),
    security(("BearerToken" = [])),
    tags = ["boats"],
    operation_id = "updateBoat"
)]
#[put("/boats/{boat_id}")]
pub async fn update_boat(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<BoatBody>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let draft = BoatDraft::try_from(body.into_inner())?;
    let boat = state
        .boats
        .update_boat(UpdateBoatRequest {
            boat_id: parse_boat_id(&path.into_inner())?,
            caller: caller.into_inner(),
            draft,
        })
        .await?;
    Ok(HttpResponse::Ok().json(boat))
}

/// Replace the supplied payload fields of one of the caller's boats.
#[utoipa::path(
    patch,
    path = "/boats/{boat_id}",
    request_body = BoatPatchBody,
    responses(
        (status = 200, description = "The patched boat", body = Boat),
        (status = 403, description = "Caller does not own this boat", body = Error),
        (status = 404, description = "No such boat", body = Error)
    ),
    params(("boat_id" = String, Path, description = "Boat identifier")),
    security(("BearerToken" = [])),
    tags = ["boats"],
    operation_id = "patchBoat"
)]
#[patch("/boats/{boat_id}")]
pub async fn patch_boat(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<BoatPatchBody>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let body = body.into_inner();
    let boat = state
        .boats
        .patch_boat(PatchBoatRequest {
            boat_id: parse_boat_id(&path.into_inner())?,
            caller: caller.into_inner(),
            name: body.name,
            boat_type: body.boat_type,
            length: body.length,
        })
        .await?;
    Ok(HttpResponse::Ok().json(boat))
}

/// Delete one of the caller's boats; every carried load is detached first.
#[utoipa::path(
    delete,
    path = "/boats/{boat_id}",
    responses(
        (status = 204, description = "Boat deleted"),
        (status = 403, description = "Caller does not own this boat", body = Error),
        (status = 404, description = "No such boat", body = Error)
    ),
    params(("boat_id" = String, Path, description = "Boat identifier")),
    security(("BearerToken" = [])),
    tags = ["boats"],
    operation_id = "deleteBoat"
)]
#[delete("/boats/{boat_id}")]
pub async fn delete_boat(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .boats
        .delete_boat(DeleteBoatRequest {
            boat_id: parse_boat_id(&path.into_inner())?,
            caller: caller.into_inner(),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Put a load on one of the caller's boats.
#[utoipa::path(
    put,
    path = "/boats/{boat_id}/loads/{load_id}",
    responses(
        (status = 204, description = "Load assigned"),
        (status = 403, description = "Caller does not own this boat", body = Error),
        (status = 404, description = "No such boat or load", body = Error),
        (status = 409, description = "Load already has a carrier", body = Error)
    ),
    params(
        ("boat_id" = String, Path, description = "Boat identifier"),
        ("load_id" = String, Path, description = "Load identifier")
    ),
    security(("BearerToken" = [])),
    tags = ["boats"],
    operation_id = "assignLoad"
)]
#[put("/boats/{boat_id}/loads/{load_id}")]
pub async fn assign_load(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (boat_id, load_id) = path.into_inner();
    state
        .assignments
        .assign_load(AssignmentRequest {
            boat_id: parse_boat_id(&boat_id)?,
            load_id: parse_load_id(&load_id)?,
            caller: caller.into_inner(),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Take a load off one of the caller's boats.
#[utoipa::path(
    delete,
    path = "/boats/{boat_id}/loads/{load_id}",
    responses(
        (status = 204, description = "Load released"),
        (status = 403, description = "Caller does not own this boat", body = Error),
        (status = 404, description = "No such boat or load, or load not on this boat", body = Error)
    ),
    params(
        ("boat_id" = String, Path, description = "Boat identifier"),
        ("load_id" = String, Path, description = "Load identifier")
    ),
    security(("BearerToken" = [])),
    tags = ["boats"],
    operation_id = "releaseLoad"
)]
#[delete("/boats/{boat_id}/loads/{load_id}")]
pub async fn release_load(
    state: web::Data<HttpState>,
    caller: AuthenticatedSubject,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (boat_id, load_id) = path.into_inner();
    state
        .assignments
        .release_load(AssignmentRequest {
            boat_id: parse_boat_id(&boat_id)?,
            load_id: parse_load_id(&load_id)?,
            caller: caller.into_inner(),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
