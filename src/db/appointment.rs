use crate::db::{postgres_service::PostgresService, write_error};
use crate::types::{
    appointment::{AppointmentRes, RAppointment},
    error::AppError,
    query::ListFilter,
};
use crate::utils::token;
use entity::appointment::{ActiveModel as AppointmentActive, Column, Entity as Appointment, Model as AppointmentModel, Status};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

impl PostgresService {
    pub async fn list_appointments(&self, filter: ListFilter) -> Result<Vec<AppointmentRes>, AppError> {
        let mut query = Appointment::find();
        if let Some(doctor) = filter.doctor {
            query = query.filter(Column::DoctorId.eq(doctor));
        }
        if let Some(user) = filter.user {
            query = query.filter(Column::UserId.eq(user));
        }
        let rows = query
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Time)
            .all(&self.db)
            .await?;
        self.nest_appointments(rows).await
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<AppointmentRes, AppError> {
        let row = self.find_appointment(id).await?;
        self.nest_one_appointment(row).await
    }

    /// `owner` always wins over whatever the request body said.
    pub async fn create_appointment(&self, owner: Uuid, payload: RAppointment) -> Result<AppointmentRes, AppError> {
        let doctor = payload.doctor.unwrap_or_default();
        let mut am = AppointmentActive {
            id: Set(token::new_id()),
            status: Set(Status::default()),
            ..Default::default()
        };
        payload.apply(&mut am);
        am.user_id = Set(owner);

        let row = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Appointment already exists.", Some(("doctor", doctor))))?;
        self.nest_one_appointment(row).await
    }

    pub async fn update_appointment(&self, id: Uuid, payload: RAppointment) -> Result<AppointmentRes, AppError> {
        let current = self.find_appointment(id).await?;
        let doctor = payload.doctor.unwrap_or(current.doctor_id);
        let mut am: AppointmentActive = current.into();
        payload.apply(&mut am);

        let row = am
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Appointment already exists.", Some(("doctor", doctor))))?;
        self.nest_one_appointment(row).await
    }

    pub async fn delete_appointment(&self, id: Uuid) -> Result<(), AppError> {
        let res = Appointment::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn find_appointment(&self, id: Uuid) -> Result<AppointmentModel, AppError> {
        Ok(Appointment::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Appointment does not exist".into()))?)
    }

    async fn nest_one_appointment(&self, row: AppointmentModel) -> Result<AppointmentRes, AppError> {
        self.nest_appointments(vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("appointment vanished while loading".into()))
    }

    /// Loads owners and doctors in two batched queries and embeds them.
    async fn nest_appointments(&self, rows: Vec<AppointmentModel>) -> Result<Vec<AppointmentRes>, AppError> {
        let users = rows.load_one(entity::user::Entity, &self.db).await?;
        let doctors = rows.load_one(entity::doctor::Entity, &self.db).await?;

        rows.into_iter()
            .zip(users)
            .zip(doctors)
            .map(|((row, user), doctor)| match (user, doctor) {
                (Some(user), Some(doctor)) => Ok(AppointmentRes::new(row, user.into(), doctor.into())),
                _ => Err(AppError::Internal(format!("appointment {} has a dangling reference", row.id))),
            })
            .collect()
    }
}
