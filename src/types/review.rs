use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use entity::review::{ActiveModel as ReviewActive, Model as ReviewModel, MAX_RATING, MIN_RATING};

use crate::types::doctor::DoctorRes;
use crate::types::error::AppError;
use crate::types::user::UserRes;
use crate::types::validation::{self, FieldReader};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReviewRes {
    pub id: Uuid,
    pub user: UserRes,
    pub doctor: DoctorRes,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReviewRes {
    pub fn new(m: ReviewModel, user: UserRes, doctor: DoctorRes) -> Self {
        Self {
            id: m.id,
            user,
            doctor,
            rating: m.rating,
            comment: m.comment,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct RReview {
    pub doctor: Option<Uuid>,
    pub rating: Option<i32>,
    pub comment: Option<Option<String>>,
}

impl RReview {
    pub fn read(body: Map<String, Value>, partial: bool) -> Result<Self, AppError> {
        let mut r = FieldReader::new(body, partial);
        let doctor = r.required("doctor");
        let rating = r.required::<i32>("rating");
        let rating = r.check("rating", rating, |v| validation::within(*v, MIN_RATING, MAX_RATING));
        let comment = r.nullable("comment");
        r.finish(Self { doctor, rating, comment })
    }

    pub fn apply(self, am: &mut ReviewActive) {
        if let Some(v) = self.doctor { am.doctor_id = Set(v); }
        if let Some(v) = self.rating { am.rating = Set(v); }
        if let Some(v) = self.comment { am.comment = Set(v); }
    }
}
