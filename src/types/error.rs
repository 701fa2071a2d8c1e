use actix_web::{http::{header, StatusCode}, HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::types::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum AppError {
    // standard web stuffs
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(FieldErrors),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    // infra things
    #[error(transparent)]
    Db(sea_orm::DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a FieldErrors>,
}

impl AppError {
    pub const NOT_AUTHENTICATED: &'static str = "Authentication credentials were not provided.";
    pub const BAD_TOKEN: &'static str = "Given token not valid for any token type";
    pub const BAD_CREDENTIALS: &'static str = "No active account found with the given credentials";

    fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotFound => "Not found.".to_string(),
            Self::Conflict(m) | Self::BadRequest(m) => m.clone(),
            Self::Validation(_) => "Invalid input.".to_string(),
            Self::Unauthorized(m) => (*m).to_string(),
            // store details stay in the server log
            Self::Db(_) | Self::Internal(_) => "Internal server error.".to_string(),
        }
    }

    fn from_db(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(_) = err {
            return AppError::NotFound;
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("A record with these values already exists.".to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::BadRequest("Related record missing.".to_string())
            }
            _ => AppError::Db(err),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Db(e) = self {
            tracing::error!("database error: {e}");
        }
        if let Self::Internal(e) = self {
            tracing::error!("internal error: {e}");
        }

        let fields = match self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        };
        let mut res = HttpResponse::build(self.status_code());
        if let Self::Unauthorized(_) = self {
            res.insert_header((header::WWW_AUTHENTICATE, r#"Bearer realm="api""#));
        }
        res.json(ErrorBody { error: self.kind(), message: self.message(), fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_404() {
        let err: AppError = DbErr::RecordNotFound("Doctor does not exist".into()).into();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unauthorized_carries_challenge_header() {
        let res = AppError::Unauthorized(AppError::NOT_AUTHENTICATED).error_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[test]
    fn validation_is_a_client_error() {
        let mut fields = FieldErrors::default();
        fields.add("rating", "\"6\" is not a valid choice.");
        assert_eq!(AppError::Validation(fields).status_code(), StatusCode::BAD_REQUEST);
    }
}
