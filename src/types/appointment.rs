use chrono::{NaiveDate, NaiveTime};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use entity::appointment::{ActiveModel as AppointmentActive, Model as AppointmentModel, Status};

use crate::types::doctor::DoctorRes;
use crate::types::error::AppError;
use crate::types::user::UserRes;
use crate::types::validation::FieldReader;

/// Appointment with its owner and doctor embedded in full.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRes {
    pub id: Uuid,
    pub user: UserRes,
    pub doctor: DoctorRes,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: Status,
}

impl AppointmentRes {
    pub fn new(m: AppointmentModel, user: UserRes, doctor: DoctorRes) -> Self {
        Self { id: m.id, user, doctor, date: m.date, time: m.time, status: m.status }
    }
}

/// Any `user` key in the body is ignored; the owner is always the caller.
#[derive(Debug, Default)]
pub struct RAppointment {
    pub doctor: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub status: Option<Status>,
}

impl RAppointment {
    pub fn read(body: Map<String, Value>, partial: bool) -> Result<Self, AppError> {
        let mut r = FieldReader::new(body, partial);
        let doctor = r.required("doctor");
        let date = r.required("date");
        let time = r.required("time");
        let status = r.choice("status");
        r.finish(Self { doctor, date, time, status })
    }

    pub fn apply(self, am: &mut AppointmentActive) {
        if let Some(v) = self.doctor { am.doctor_id = Set(v); }
        if let Some(v) = self.date { am.date = Set(v); }
        if let Some(v) = self.time { am.time = Set(v); }
        if let Some(v) = self.status { am.status = Set(v); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_in_body_is_ignored() {
        let body = json!({
            "user": Uuid::new_v4(),
            "doctor": Uuid::new_v4(),
            "date": "2025-03-01",
            "time": "10:15:00"
        });
        let appt = RAppointment::read(body.as_object().cloned().unwrap(), false).unwrap();
        assert!(appt.status.is_none());
    }

    #[test]
    fn status_outside_the_four_values_is_rejected() {
        let body = json!({"status": "rescheduled"});
        let Err(AppError::Validation(errors)) = RAppointment::read(body.as_object().cloned().unwrap(), true) else {
            panic!("expected validation error")
        };
        assert_eq!(
            errors.get("status"),
            Some(&["\"rescheduled\" is not a valid choice.".to_string()][..])
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Status::Cancelled).unwrap(), json!("cancelled"));
        assert_eq!(Status::default(), Status::Pending);
    }
}
