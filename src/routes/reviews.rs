use std::sync::Arc;

use actix_web::{delete, get, patch, post, put, web};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::policy::{Operation, PolicyTable, Resource};
use crate::types::review::{RReview, ReviewRes};
use crate::types::query::ListFilter;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::Caller;

const RESOURCE: Resource = Resource::Reviews;

type Db = web::Data<Arc<PostgresService>>;
type Policy = web::Data<PolicyTable>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
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
) -> ApiResult<Vec<ReviewRes>> {
    policy.authorize(RESOURCE, Operation::List, &caller)?;
    Ok(ApiResponse::Ok(db.list_reviews(filter.into_inner()).await?))
}

/// The owner is the caller, never the body.
#[post("/")]
async fn create(
    db: Db,
    policy: Policy,
    caller: Caller,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<ReviewRes> {
    policy.authorize(RESOURCE, Operation::Create, &caller)?;
    let owner = caller.require_user()?.id;
    let payload = RReview::read(body.into_inner(), false)?;

    let review = db.create_review(owner, payload).await?;
    info!(review_id = %review.id, user_id = %owner, doctor_id = %review.doctor.id, rating = review.rating, "review posted");
    Ok(ApiResponse::Created(review))
}

#[get("/{id}/")]
async fn retrieve(db: Db, policy: Policy, caller: Caller, path: web::Path<Uuid>) -> ApiResult<ReviewRes> {
    policy.authorize(RESOURCE, Operation::Retrieve, &caller)?;
    Ok(ApiResponse::Ok(db.get_review(path.into_inner()).await?))
}

#[put("/{id}/")]
async fn update(
    db: Db,
    policy: Policy,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<ReviewRes> {
    policy.authorize(RESOURCE, Operation::Update, &caller)?;
    let payload = RReview::read(body.into_inner(), false)?;
    Ok(ApiResponse::Ok(db.update_review(path.into_inner(), payload).await?))
}

#[patch("/{id}/")]
async fn partial_update(
    db: Db,
    policy: Policy,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<ReviewRes> {
    policy.authorize(RESOURCE, Operation::PartialUpdate, &caller)?;
    let payload = RReview::read(body.into_inner(), true)?;
    Ok(ApiResponse::Ok(db.update_review(path.into_inner(), payload).await?))
}

#[delete("/{id}/")]
async fn destroy(db: Db, policy: Policy, caller: Caller, path: web::Path<Uuid>) -> ApiResult<()> {
    policy.authorize(RESOURCE, Operation::Destroy, &caller)?;
    db.delete_review(path.into_inner()).await?;
    Ok(ApiResponse::NoContent)
}
