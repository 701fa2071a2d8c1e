use actix_web::get;

use crate::types::response::{ApiResponse, ApiResult};

/// Liveness only; the database is not consulted.
#[get("/")]
async fn health() -> ApiResult<()> {
    Ok(ApiResponse::EmptyOk)
}
