use std::sync::Arc;

use actix_web::{dev::Payload, http::header::Header, web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures_util::future::{FutureExt, LocalBoxFuture};
use uuid::Uuid;

use entity::user::Model as UserModel;

use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::token::TokenType;
use crate::utils::token;

/// Whoever sent the request: an active user resolved from the bearer token, or nobody.
///
/// A missing `Authorization` header yields an anonymous caller. A header that is
/// present but invalid, expired, or names an unknown or inactive user is rejected
/// outright, whatever access rule the endpoint has.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    user: Option<UserModel>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: UserModel) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn require_user(&self) -> Result<&UserModel, AppError> {
        self.user
            .as_ref()
            .ok_or(AppError::Unauthorized(AppError::NOT_AUTHENTICATED))
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if !req.headers().contains_key(actix_web::http::header::AUTHORIZATION) {
            return async { Ok(Caller::anonymous()) }.boxed_local();
        }

        let bearer = Authorization::<Bearer>::parse(req)
            .map(|auth| auth.into_scheme().token().to_string());
        let db = req.app_data::<web::Data<Arc<PostgresService>>>().cloned();

        async move {
            let token = bearer.map_err(|_| AppError::Unauthorized(AppError::BAD_TOKEN))?;
            let claims = token::verify(&token, TokenType::Access, &config().jwt)?;
            let db = db.ok_or_else(|| AppError::Internal("database not configured".into()))?;

            let user = match db.get_user_by_id(&claims.user_id).await {
                Ok(user) => user,
                Err(AppError::NotFound) => return Err(AppError::Unauthorized("User not found")),
                Err(e) => return Err(e),
            };
            if !user.is_active {
                return Err(AppError::Unauthorized("User is inactive"));
            }
            Ok(Caller::authenticated(user))
        }
        .boxed_local()
    }
}
