use actix_cors::Cors;
use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest,
};

use crate::types::error::AppError;
use crate::types::query::ListFilter;

pub mod appointments;
pub mod availabilities;
pub mod doctors;
pub mod health;
pub mod reviews;
pub mod root;
pub mod token;
pub mod users;

/// Malformed or non-JSON bodies surface in the same error shape as everything else.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("JSON parse error - {err}")).into()
}

/// Bad list filters are reported per parameter, like body fields.
fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let fields = ListFilter::errors(req.query_string());
    if fields.is_empty() {
        AppError::BadRequest(format!("Invalid query string - {err}")).into()
    } else {
        AppError::Validation(fields).into()
    }
}

/// Cross-origin access for browser clients. An empty list allows any origin.
pub fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);
    if origins.is_empty() {
        return cors.allow_any_origin();
    }
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error));
    cfg.app_data(web::QueryConfig::default().error_handler(query_error));

    cfg.service(root::api_root);
    cfg.service(web::scope("/health").service(health::health));
    cfg.service(
        web::scope("/token")
            .service(token::obtain)
            .service(token::refresh)
    );

    users::configure(cfg);
    doctors::configure(cfg);
    availabilities::configure(cfg);
    appointments::configure(cfg);
    reviews::configure(cfg);
}
