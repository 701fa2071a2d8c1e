use crate::db::{postgres_service::PostgresService, write_error};
use crate::types::{doctor::RDoctor, error::AppError};
use crate::utils::token;
use entity::doctor::{ActiveModel as DoctorActive, Column, Entity as Doctor, Model as DoctorModel};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

impl PostgresService {
    pub async fn list_doctors(&self) -> Result<Vec<DoctorModel>, AppError> {
        Ok(Doctor::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn get_doctor(&self, id: Uuid) -> Result<DoctorModel, AppError> {
        Ok(Doctor::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Doctor does not exist".into()))?)
    }

    pub async fn create_doctor(&self, payload: RDoctor) -> Result<DoctorModel, AppError> {
        let mut am = DoctorActive {
            id: Set(token::new_id()),
            rating: Set(Decimal::new(0, 2)),
            ..Default::default()
        };
        payload.apply(&mut am);
        am.insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Doctor already exists.", None))
    }

    pub async fn update_doctor(&self, id: Uuid, payload: RDoctor) -> Result<DoctorModel, AppError> {
        let mut am: DoctorActive = self.get_doctor(id).await?.into();
        payload.apply(&mut am);
        Ok(am.update(&self.db).await?)
    }

    /// Removes the doctor together with its availability slots, appointments and reviews.
    pub async fn delete_doctor(&self, id: Uuid) -> Result<(), AppError> {
        let res = Doctor::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
