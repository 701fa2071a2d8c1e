use chrono::{NaiveDate, NaiveTime};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use entity::availability::{ActiveModel as AvailabilityActive, Model as AvailabilityModel};

use crate::types::error::AppError;
use crate::types::validation::FieldReader;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRes {
    pub id: Uuid,
    pub doctor: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl From<AvailabilityModel> for AvailabilityRes {
    fn from(m: AvailabilityModel) -> Self {
        Self {
            id: m.id,
            doctor: m.doctor_id,
            date: m.date,
            start_time: m.start_time,
            end_time: m.end_time,
            is_available: m.is_available,
        }
    }
}

/// Slot write payload. Windows are not checked against each other or against `end_time > start_time`.
#[derive(Debug, Default)]
pub struct RAvailability {
    pub doctor: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_available: Option<bool>,
}

impl RAvailability {
    pub fn read(body: Map<String, Value>, partial: bool) -> Result<Self, AppError> {
        let mut r = FieldReader::new(body, partial);
        let doctor = r.required("doctor");
        let date = r.required("date");
        let start_time = r.required("start_time");
        let end_time = r.required("end_time");
        let is_available = r.optional("is_available");
        r.finish(Self { doctor, date, start_time, end_time, is_available })
    }

    pub fn apply(self, am: &mut AvailabilityActive) {
        if let Some(v) = self.doctor { am.doctor_id = Set(v); }
        if let Some(v) = self.date { am.date = Set(v); }
        if let Some(v) = self.start_time { am.start_time = Set(v); }
        if let Some(v) = self.end_time { am.end_time = Set(v); }
        if let Some(v) = self.is_available { am.is_available = Set(v); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_dates_and_times() {
        let doctor = Uuid::new_v4();
        let body = json!({
            "doctor": doctor,
            "date": "2025-03-01",
            "start_time": "09:00:00",
            "end_time": "09:30:00"
        });
        let slot = RAvailability::read(body.as_object().cloned().unwrap(), false).unwrap();
        assert_eq!(slot.doctor, Some(doctor));
        assert_eq!(slot.date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(slot.start_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(slot.is_available, None);
    }

    #[test]
    fn bad_date_is_reported_on_the_field() {
        let body = json!({
            "doctor": Uuid::new_v4(),
            "date": "tomorrow",
            "start_time": "09:00:00",
            "end_time": "09:30:00"
        });
        let Err(AppError::Validation(errors)) = RAvailability::read(body.as_object().cloned().unwrap(), false) else {
            panic!("expected validation error")
        };
        assert!(errors.get("date").is_some());
        assert!(errors.get("doctor").is_none());
    }
}
