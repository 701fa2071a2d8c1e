use crate::db::{postgres_service::PostgresService, write_error};
use crate::types::{availability::RAvailability, error::AppError, query::ListFilter};
use crate::utils::token;
use entity::availability::{ActiveModel as AvailabilityActive, Column, Entity as Availability, Model as AvailabilityModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

const SLOT_TAKEN: &str = "The fields doctor, date, start_time, end_time must make a unique set.";

impl PostgresService {
    /// Ordered by date, then start time.
    pub async fn list_availabilities(&self, filter: ListFilter) -> Result<Vec<AvailabilityModel>, AppError> {
        let mut query = Availability::find();
        if let Some(doctor) = filter.doctor {
            query = query.filter(Column::DoctorId.eq(doctor));
        }
        Ok(query
            .order_by_asc(Column::Date)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await?)
    }

    pub async fn get_availability(&self, id: Uuid) -> Result<AvailabilityModel, AppError> {
        Ok(Availability::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Availability does not exist".into()))?)
    }

    /// Duplicate slots are left to the unique index; no application-side pre-check.
    pub async fn create_availability(&self, payload: RAvailability) -> Result<AvailabilityModel, AppError> {
        let doctor = payload.doctor.unwrap_or_default();
        let mut am = AvailabilityActive {
            id: Set(token::new_id()),
            is_available: Set(true),
            ..Default::default()
        };
        payload.apply(&mut am);
        am.insert(&self.db)
            .await
            .map_err(|e| write_error(e, SLOT_TAKEN, Some(("doctor", doctor))))
    }

    pub async fn update_availability(&self, id: Uuid, payload: RAvailability) -> Result<AvailabilityModel, AppError> {
        let current = self.get_availability(id).await?;
        let doctor = payload.doctor.unwrap_or(current.doctor_id);
        let mut am: AvailabilityActive = current.into();
        payload.apply(&mut am);
        am.update(&self.db)
            .await
            .map_err(|e| write_error(e, SLOT_TAKEN, Some(("doctor", doctor))))
    }

    pub async fn delete_availability(&self, id: Uuid) -> Result<(), AppError> {
        let res = Availability::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
