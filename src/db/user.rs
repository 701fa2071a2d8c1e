use crate::db::{postgres_service::PostgresService, write_error};
use crate::types::{error::AppError, user::RUser};
use crate::utils::token;
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

const USERNAME_TAKEN: &str = "A user with that username already exists.";

impl PostgresService {
    pub async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .order_by_asc(Column::Username)
            .all(&self.db)
            .await?)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// `password_hash` of `None` leaves the account without a usable password.
    pub async fn create_user(&self, payload: RUser, password_hash: Option<String>) -> Result<UserModel, AppError> {
        let mut am = UserActive {
            id: Set(token::new_id()),
            email: Set(String::new()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            password_hash: Set(password_hash),
            is_active: Set(true),
            is_staff: Set(false),
            date_joined: Set(Utc::now()),
            ..Default::default()
        };
        payload.apply(&mut am);
        am.insert(&self.db)
            .await
            .map_err(|e| write_error(e, USERNAME_TAKEN, None))
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        payload: RUser,
        password_hash: Option<String>,
    ) -> Result<UserModel, AppError> {
        let mut am: UserActive = self.get_user_by_id(&id).await?.into();
        payload.apply(&mut am);
        if let Some(hash) = password_hash {
            am.password_hash = Set(Some(hash));
        }
        am.update(&self.db)
            .await
            .map_err(|e| write_error(e, USERNAME_TAKEN, None))
    }

    pub async fn set_user_staff(&self, id: Uuid, is_staff: bool) -> Result<UserModel, AppError> {
        let mut am: UserActive = self.get_user_by_id(&id).await?.into();
        am.is_staff = Set(is_staff);
        Ok(am.update(&self.db).await?)
    }

    pub async fn set_user_active(&self, id: Uuid, is_active: bool) -> Result<UserModel, AppError> {
        let mut am: UserActive = self.get_user_by_id(&id).await?.into();
        am.is_active = Set(is_active);
        Ok(am.update(&self.db).await?)
    }

    /// Cascades to the user's appointments, reviews and group memberships.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        let res = User::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
