use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

use crate::types::error::AppError;
use crate::types::validation::FieldErrors;

pub mod appointment;
pub mod availability;
pub mod doctor;
pub mod group;
pub mod permission;
pub mod postgres_service;
pub mod review;
pub mod user;

/// Maps a failed insert/update to what the caller should see.
///
/// `unique` is the message for a uniqueness violation; `reference` names the request
/// field whose id the foreign key points at.
pub(crate) fn write_error(err: DbErr, unique: &str, reference: Option<(&str, Uuid)>) -> AppError {
    match (err.sql_err(), reference) {
        (Some(SqlErr::UniqueConstraintViolation(_)), _) => AppError::Conflict(unique.to_string()),
        (Some(SqlErr::ForeignKeyConstraintViolation(_)), Some((field, id))) => {
            let mut errors = FieldErrors::default();
            errors.add(field, format!("Invalid pk \"{id}\" - object does not exist."));
            AppError::Validation(errors)
        }
        _ => err.into(),
    }
}
