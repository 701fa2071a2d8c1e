use crate::db::{postgres_service::PostgresService, write_error};
use crate::types::{
    error::AppError,
    query::ListFilter,
    review::{RReview, ReviewRes},
};
use crate::utils::token;
use chrono::Utc;
use entity::review::{ActiveModel as ReviewActive, Column, Entity as Review, Model as ReviewModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

const ALREADY_REVIEWED: &str = "The fields user, doctor must make a unique set.";

impl PostgresService {
    /// Newest first.
    pub async fn list_reviews(&self, filter: ListFilter) -> Result<Vec<ReviewRes>, AppError> {
        let mut query = Review::find();
        if let Some(doctor) = filter.doctor {
            query = query.filter(Column::DoctorId.eq(doctor));
        }
        if let Some(user) = filter.user {
            query = query.filter(Column::UserId.eq(user));
        }
        let rows = query
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.nest_reviews(rows).await
    }

    pub async fn get_review(&self, id: Uuid) -> Result<ReviewRes, AppError> {
        let row = self.find_review(id).await?;
        self.nest_one_review(row).await
    }

    /// One review per (user, doctor); a second one fails on the unique index.
    pub async fn create_review(&self, owner: Uuid, payload: RReview) -> Result<ReviewRes, AppError> {
        let doctor = payload.doctor.unwrap_or_default();
        let mut am = ReviewActive {
            id: Set(token::new_id()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        payload.apply(&mut am);
        am.user_id = Set(owner);

        let row = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, ALREADY_REVIEWED, Some(("doctor", doctor))))?;
        self.nest_one_review(row).await
    }

    pub async fn update_review(&self, id: Uuid, payload: RReview) -> Result<ReviewRes, AppError> {
        let current = self.find_review(id).await?;
        let doctor = payload.doctor.unwrap_or(current.doctor_id);
        let mut am: ReviewActive = current.into();
        payload.apply(&mut am);

        let row = am
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, ALREADY_REVIEWED, Some(("doctor", doctor))))?;
        self.nest_one_review(row).await
    }

    pub async fn delete_review(&self, id: Uuid) -> Result<(), AppError> {
        let res = Review::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn find_review(&self, id: Uuid) -> Result<ReviewModel, AppError> {
        Ok(Review::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Review does not exist".into()))?)
    }

    async fn nest_one_review(&self, row: ReviewModel) -> Result<ReviewRes, AppError> {
        self.nest_reviews(vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("review vanished while loading".into()))
    }

    async fn nest_reviews(&self, rows: Vec<ReviewModel>) -> Result<Vec<ReviewRes>, AppError> {
        let users = rows.load_one(entity::user::Entity, &self.db).await?;
        let doctors = rows.load_one(entity::doctor::Entity, &self.db).await?;

        rows.into_iter()
            .zip(users)
            .zip(doctors)
            .map(|((row, user), doctor)| match (user, doctor) {
                (Some(user), Some(doctor)) => Ok(ReviewRes::new(row, user.into(), doctor.into())),
                _ => Err(AppError::Internal(format!("review {} has a dangling reference", row.id))),
            })
            .collect()
    }
}
