use std::collections::HashMap;

use actix_web::web;
use serde::Deserialize;
use uuid::Uuid;

use crate::types::validation::FieldErrors;

/// Optional `?doctor=<id>&user=<id>` narrowing for collection reads.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct ListFilter {
    pub doctor: Option<Uuid>,
    pub user: Option<Uuid>,
}

impl ListFilter {
    const PARAMS: [&'static str; 2] = ["doctor", "user"];

    /// Per-parameter messages for a query string that failed to deserialize.
    /// Unknown parameters are ignored, as they are on success.
    pub fn errors(query: &str) -> FieldErrors {
        let mut errors = FieldErrors::default();
        let Ok(params) = web::Query::<HashMap<String, String>>::from_query(query) else {
            return errors;
        };
        for (key, value) in params.iter() {
            if Self::PARAMS.contains(&key.as_str()) && Uuid::parse_str(value).is_err() {
                errors.add(key, format!("\"{value}\" is not a valid UUID."));
            }
        }
        errors
    }
}
