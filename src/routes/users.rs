use std::sync::Arc;

use actix_web::{delete, get, patch, post, put, web};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::policy::{Operation, PolicyTable, Resource};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUser, UserRes};
use crate::utils::token::hash_password;
use crate::utils::webutils::Caller;

const RESOURCE: Resource = Resource::Users;

type Db = web::Data<Arc<PostgresService>>;
type Policy = web::Data<PolicyTable>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(list)
            .service(create)
            .service(retrieve)
            .service(update)
            .service(partial_update)
            .service(destroy)
    );
}

#[get("/")]
async fn list(db: Db, policy: Policy, caller: Caller) -> ApiResult<Vec<UserRes>> {
    policy.authorize(RESOURCE, Operation::List, &caller)?;
    let users = db.list_users().await?;
    Ok(ApiResponse::Ok(users.into_iter().map(UserRes::from).collect()))
}

#[post("/")]
async fn create(
    db: Db,
    policy: Policy,
    caller: Caller,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<UserRes> {
    policy.authorize(RESOURCE, Operation::Create, &caller)?;
    let mut payload = RUser::read(body.into_inner(), false)?;
    let password_hash = payload.password.take().map(|p| hash_password(&p)).transpose()?;

    let user = db.create_user(payload, password_hash).await?;
    info!(user_id = %user.id, created_by = ?caller.user_id(), "user created");
    Ok(ApiResponse::Created(user.into()))
}

#[get("/{id}/")]
async fn retrieve(db: Db, policy: Policy, caller: Caller, path: web::Path<Uuid>) -> ApiResult<UserRes> {
    policy.authorize(RESOURCE, Operation::Retrieve, &caller)?;
    let user = db.get_user_by_id(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(user.into()))
}

#[put("/{id}/")]
async fn update(
    db: Db,
    policy: Policy,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<UserRes> {
    policy.authorize(RESOURCE, Operation::Update, &caller)?;
    write(&db, path.into_inner(), body.into_inner(), false).await
}

#[patch("/{id}/")]
async fn partial_update(
    db: Db,
    policy: Policy,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<UserRes> {
    policy.authorize(RESOURCE, Operation::PartialUpdate, &caller)?;
    write(&db, path.into_inner(), body.into_inner(), true).await
}

#[delete("/{id}/")]
async fn destroy(db: Db, policy: Policy, caller: Caller, path: web::Path<Uuid>) -> ApiResult<()> {
    policy.authorize(RESOURCE, Operation::Destroy, &caller)?;
    let id = path.into_inner();
    db.delete_user(id).await?;
    info!(user_id = %id, "user deleted");
    Ok(ApiResponse::NoContent)
}

async fn write(db: &PostgresService, id: Uuid, body: Map<String, Value>, partial: bool) -> ApiResult<UserRes> {
    let mut payload = RUser::read(body, partial)?;
    let password_hash = payload.password.take().map(|p| hash_password(&p)).transpose()?;
    let user = db.update_user(id, payload, password_hash).await?;
    Ok(ApiResponse::Ok(user.into()))
}
