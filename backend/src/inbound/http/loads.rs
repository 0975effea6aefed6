//! Load API handlers.
//!
//! ```text
//! GET    /loads              list all loads (paged)
//! POST   /loads              create a load
//! GET    /loads/{load_id}    read one load
//! PUT    /loads/{load_id}    replace payload fields
//! PATCH  /loads/{load_id}    replace supplied fields
//! DELETE /loads/{load_id}    delete, scrubbing the carrier's reverse ref
//! ```
//!
//! Load routes perform no authentication: loads are unowned and governed
//! only through whichever boat carries them.

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{
    ListLoadsRequest, LoadCommand as _, LoadQuery as _, PatchLoadRequest, UpdateLoadRequest,
};
use crate::domain::{Error, Load, LoadDraft};
use crate::inbound::http::accept::require_json;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, next_page_link, parse_cursor, parse_load_id};

/// Load payload for create and full update.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoadBody {
    /// Load weight.
    pub weight: i64,
    /// Description of the cargo.
    pub content: String,
    /// Requested delivery date.
    pub delivery_date: String,
}

impl TryFrom<LoadBody> for LoadDraft {
    type Error = Error;

    fn try_from(body: LoadBody) -> Result<Self, Self::Error> {
        LoadDraft::new(body.weight, body.content, body.delivery_date)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Load payload for partial update; omitted fields keep their value.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoadPatchBody {
    /// Replacement weight, when supplied.
    pub weight: Option<i64>,
    /// Replacement content, when supplied.
    pub content: Option<String>,
    /// Replacement delivery date, when supplied.
    pub delivery_date: Option<String>,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Continuation token from a previous page.
    pub cursor: Option<String>,
}

/// One page of loads.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoadListBody {
    /// Loads on this page.
    pub items: Vec<Load>,
    /// Total number of loads.
    #[serde(rename = "totalRecords")]
    pub total_records: usize,
    /// Absolute URL of the next page, when more results exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// List all loads, five per page.
#[utoipa::path(
    get,
    path = "/loads",
    responses(
        (status = 200, description = "One page of loads", body = LoadListBody),
        (status = 406, description = "JSON not acceptable", body = Error)
    ),
    params(("cursor" = Option<String>, Query, description = "Opaque continuation token")),
    tags = ["loads"],
    operation_id = "listLoads"
)]
#[get("/loads")]
pub async fn list_loads(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let cursor = parse_cursor(query.into_inner().cursor)?;
    let page = state.loads_query.list_loads(ListLoadsRequest { cursor }).await?;
    let next = next_page_link(&state.root_url, "/loads", page.next_cursor.as_ref())?;
    Ok(HttpResponse::Ok().json(LoadListBody {
        items: page.items,
        total_records: page.total,
        next,
    }))
}

/// Create a load with no carrier.
#[utoipa::path(
    post,
    path = "/loads",
    request_body = LoadBody,
    responses(
        (status = 201, description = "Load created", body = Load),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 406, description = "JSON not acceptable", body = Error)
    ),
    tags = ["loads"],
    operation_id = "createLoad"
)]
#[post("/loads")]
pub async fn create_load(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Json<LoadBody>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let draft = LoadDraft::try_from(body.into_inner())?;
    let load = state.loads.create_load(draft).await?;
    Ok(HttpResponse::Created().json(load))
}

/// Read one load.
#[utoipa::path(
    get,
    path = "/loads/{load_id}",
    responses(
        (status = 200, description = "The load", body = Load),
        (status = 404, description = "No such load", body = Error)
    ),
    params(("load_id" = String, Path, description = "Load identifier")),
    tags = ["loads"],
    operation_id = "getLoad"
)]
#[get("/loads/{load_id}")]
pub async fn get_load(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let load = state
        .loads_query
        .get_load(parse_load_id(&path.into_inner())?)
        .await?;
    Ok(HttpResponse::Ok().json(load))
}

/// Replace every payload field of a load.
#[utoipa::path(
    put,
    path = "/loads/{load_id}",
    request_body = LoadBody,
    responses(
        (status = 200, description = "The updated load", body = Load),
        (status = 404, description = "No such load", body = Error)
    ),
    params(("load_id" = String, Path, description = "Load identifier")),
    tags = ["loads"],
    operation_id = "updateLoad"
)]
#[put("/loads/{load_id}")]
pub async fn update_load(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<LoadBody>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let draft = LoadDraft::try_from(body.into_inner())?;
    let load = state
        .loads
        .update_load(UpdateLoadRequest {
            load_id: parse_load_id(&path.into_inner())?,
            draft,
        })
        .await?;
    Ok(HttpResponse::Ok().json(load))
}

/// Replace the supplied payload fields of a load.
#[utoipa::path(
    patch,
    path = "/loads/{load_id}",
    request_body = LoadPatchBody,
    responses(
        (status = 200, description = "The patched load", body = Load),
        (status = 404, description = "No such load", body = Error)
    ),
    params(("load_id" = String, Path, description = "Load identifier")),
    tags = ["loads"],
    operation_id = "patchLoad"
)]
#[patch("/loads/{load_id}")]
pub async fn patch_load(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<LoadPatchBody>,
) -> ApiResult<HttpResponse> {
    require_json(&req)?;
    let body = body.into_inner();
    let load = state
        .loads
        .patch_load(PatchLoadRequest {
            load_id: parse_load_id(&path.into_inner())?,
            weight: body.weight,
            content: body.content,
            delivery_date: body.delivery_date,
        })
        .await?;
    Ok(HttpResponse::Ok().json(load))
}

/// Delete a load; the carrying boat's loads sequence is scrubbed first.
#[utoipa::path(
    delete,
    path = "/loads/{load_id}",
    responses(
        (status = 204, description = "Load deleted"),
        (status = 404, description = "No such load", body = Error)
    ),
    params(("load_id" = String, Path, description = "Load identifier")),
    tags = ["loads"],
    operation_id = "deleteLoad"
)]
#[delete("/loads/{load_id}")]
pub async fn delete_load(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .loads
        .delete_load(parse_load_id(&path.into_inner())?)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
