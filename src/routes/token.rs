use std::sync::Arc;

use actix_web::{post, web};
use tracing::{info, warn};

use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{AccessTokenRes, RTokenObtain, RTokenRefresh, TokenPairRes, TokenType};
use crate::utils::token::{check_password, issue, issue_pair, verify};

/// Exchanges username and password for a refresh/access pair.
#[post("/")]
async fn obtain(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RTokenObtain>,
) -> ApiResult<TokenPairRes> {
    let user = match db.get_user_by_username(&body.username).await {
        Ok(user) => Some(user),
        Err(AppError::NotFound) => None,
        Err(e) => return Err(e),
    };

    // unknown usernames still pay for a hash check
    let password_ok = check_password(
        &body.password,
        user.as_ref().and_then(|u| u.password_hash.as_deref()),
    );
    let user = match user {
        Some(user) if password_ok && user.is_active => user,
        _ => {
            warn!(username = %body.username, "token request rejected");
            return Err(AppError::Unauthorized(AppError::BAD_CREDENTIALS));
        }
    };

    info!(user_id = %user.id, "issued token pair");
    Ok(ApiResponse::Ok(issue_pair(user.id, &config().jwt)?))
}

/// Exchanges a refresh token for a fresh access token.
#[post("/refresh/")]
async fn refresh(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RTokenRefresh>,
) -> ApiResult<AccessTokenRes> {
    let claims = verify(&body.refresh, TokenType::Refresh, &config().jwt)?;

    let user = match db.get_user_by_id(&claims.user_id).await {
        Ok(user) if user.is_active => user,
        Ok(_) | Err(AppError::NotFound) => return Err(AppError::Unauthorized(AppError::BAD_TOKEN)),
        Err(e) => return Err(e),
    };

    Ok(ApiResponse::Ok(AccessTokenRes {
        access: issue(user.id, TokenType::Access, &config().jwt)?,
    }))
}
