use std::sync::Arc;

use actix_web::{delete, get, patch, post, put, web};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::policy::{Operation, PolicyTable, Resource};
use crate::types::doctor::{DoctorRes, RDoctor};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::Caller;

const RESOURCE: Resource = Resource::Doctors;

type Db = web::Data<Arc<PostgresService>>;
type Policy = web::Data<PolicyTable>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/doctors")
            .service(list)
            .service(create)
            .service(retrieve)
            .service(update)
            .service(partial_update)
            .service(destroy)
    );
}

#[get("/")]
async fn list(db: Db, policy: Policy, caller: Caller) -> ApiResult<Vec<DoctorRes>> {
    policy.authorize(RESOURCE, Operation::List, &caller)?;
    let doctors = db.list_doctors().await?;
    Ok(ApiResponse::Ok(doctors.into_iter().map(DoctorRes::from).collect()))
}

#[post("/")]
async fn create(
    db: Db,
    policy: Policy,
    caller: Caller,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<DoctorRes> {
    policy.authorize(RESOURCE, Operation::Create, &caller)?;
    let payload = RDoctor::read(body.into_inner(), false)?;
    let doctor = db.create_doctor(payload).await?;
    info!(doctor_id = %doctor.id, "doctor created");
    Ok(ApiResponse::Created(doctor.into()))
}

#[get("/{id}/")]
async fn retrieve(db: Db, policy: Policy, caller: Caller, path: web::Path<Uuid>) -> ApiResult<DoctorRes> {
    policy.authorize(RESOURCE, Operation::Retrieve, &caller)?;
    Ok(ApiResponse::Ok(db.get_doctor(path.into_inner()).await?.into()))
}

#[put("/{id}/")]
async fn update(
    db: Db,
    policy: Policy,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<DoctorRes> {
    policy.authorize(RESOURCE, Operation::Update, &caller)?;
    let payload = RDoctor::read(body.into_inner(), false)?;
    Ok(ApiResponse::Ok(db.update_doctor(path.into_inner(), payload).await?.into()))
}

#[patch("/{id}/")]
async fn partial_update(
    db: Db,
    policy: Policy,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<DoctorRes> {
    policy.authorize(RESOURCE, Operation::PartialUpdate, &caller)?;
    let payload = RDoctor::read(body.into_inner(), true)?;
    Ok(ApiResponse::Ok(db.update_doctor(path.into_inner(), payload).await?.into()))
}

#[delete("/{id}/")]
async fn destroy(db: Db, policy: Policy, caller: Caller, path: web::Path<Uuid>) -> ApiResult<()> {
    policy.authorize(RESOURCE, Operation::Destroy, &caller)?;
    let id = path.into_inner();
    db.delete_doctor(id).await?;
    info!(doctor_id = %id, "doctor deleted with its slots, appointments and reviews");
    Ok(ApiResponse::NoContent)
}
