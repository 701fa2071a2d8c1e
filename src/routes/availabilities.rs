use std::sync::Arc;

use actix_web::{delete, get, patch, post, put, web};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::policy::{Operation, PolicyTable, Resource};
use crate::types::availability::{AvailabilityRes, RAvailability};
use crate::types::query::ListFilter;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::Caller;

const RESOURCE: Resource = Resource::Availabilities;

type Db = web::Data<Arc<PostgresService>>;
type Policy = web::Data<PolicyTable>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/availabilities")
            .service(list)
            .service(create)
            .service(retrieve)
            .service(update)
            .service(partial_update)
            .service(destroy)
    );
}

#[get("/")]
async fn list(
    db: Db,
    policy: Policy,
    caller: Caller,
    filter: web::Query<ListFilter>,
) -> ApiResult<Vec<AvailabilityRes>> {
    policy.authorize(RESOURCE, Operation::List, &caller)?;
    let slots = db.list_availabilities(filter.into_inner()).await?;
    Ok(ApiResponse::Ok(slots.into_iter().map(AvailabilityRes::from).collect()))
}

#[post("/")]
async fn create(
    db: Db,
    policy: Policy,
    caller: Caller,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<AvailabilityRes> {
    policy.authorize(RESOURCE, Operation::Create, &caller)?;
    let payload = RAvailability::read(body.into_inner(), false)?;
    Ok(ApiResponse::Created(db.create_availability(payload).await?.into()))
}

#[get("/{id}/")]
async fn retrieve(db: Db, policy: Policy, caller: Caller, path: web::Path<Uuid>) -> ApiResult<AvailabilityRes> {
    policy.authorize(RESOURCE, Operation::Retrieve, &caller)?;
    Ok(ApiResponse::Ok(db.get_availability(path.into_inner()).await?.into()))
}

#[put("/{id}/")]
async fn update(
    db: Db,
    policy: Policy,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<AvailabilityRes> {
    policy.authorize(RESOURCE, Operation::Update, &caller)?;
    let payload = RAvailability::read(body.into_inner(), false)?;
    Ok(ApiResponse::Ok(db.update_availability(path.into_inner(), payload).await?.into()))
}

#[patch("/{id}/")]
async fn partial_update(
    db: Db,
    policy: Policy,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<AvailabilityRes> {
    policy.authorize(RESOURCE, Operation::PartialUpdate, &caller)?;
    let payload = RAvailability::read(body.into_inner(), true)?;
    Ok(ApiResponse::Ok(db.update_availability(path.into_inner(), payload).await?.into()))
}

#[delete("/{id}/")]
async fn destroy(db: Db, policy: Policy, caller: Caller, path: web::Path<Uuid>) -> ApiResult<()> {
    policy.authorize(RESOURCE, Operation::Destroy, &caller)?;
    db.delete_availability(path.into_inner()).await?;
    Ok(ApiResponse::NoContent)
}
