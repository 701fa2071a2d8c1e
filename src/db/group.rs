use crate::db::{postgres_service::PostgresService, write_error};
use crate::types::error::AppError;
use crate::utils::token;
use entity::group::{ActiveModel as GroupActive, Column, Entity as Group, Model as GroupModel};
use entity::user_group::{ActiveModel as MembershipActive, Entity as Membership};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

impl PostgresService {
    pub async fn create_group(&self, name: String) -> Result<GroupModel, AppError> {
        GroupActive {
            id: Set(token::new_id()),
            name: Set(name),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, "A group with that name already exists.", None))
    }

    pub async fn get_group_by_name(&self, name: &str) -> Result<GroupModel, AppError> {
        Ok(Group::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group does not exist".into()))?)
    }

    pub async fn add_user_to_group(&self, user_id: Uuid, group_id: Uuid) -> Result<(), AppError> {
        Membership::insert(MembershipActive {
            user_id: Set(user_id),
            group_id: Set(group_id),
        })
        .exec(&self.db)
        .await
        .map_err(|e| write_error(e, "User is already in that group.", None))?;
        Ok(())
    }

    pub async fn list_user_group_names(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let user = self.get_user_by_id(&user_id).await?;
        Ok(user
            .find_related(Group)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|g| g.name)
            .collect())
    }

    /// Usernames of the group's members, alphabetical.
    pub async fn list_group_member_usernames(&self, group_id: Uuid) -> Result<Vec<String>, AppError> {
        let group = Group::find_by_id(group_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group does not exist".into()))?;
        Ok(group
            .find_related(entity::user::Entity)
            .order_by_asc(entity::user::Column::Username)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| u.username)
            .collect())
    }
}
