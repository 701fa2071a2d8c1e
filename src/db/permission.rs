use crate::db::{postgres_service::PostgresService, write_error};
use crate::types::error::AppError;
use crate::utils::token;
use entity::permission::{ActiveModel as PermissionActive, Column, Entity as Permission, Model as PermissionModel};
use entity::user_permission::{ActiveModel as GrantActive, Entity as Grant};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

impl PostgresService {
    pub async fn create_permission(&self, codename: String, name: String) -> Result<PermissionModel, AppError> {
        PermissionActive {
            id: Set(token::new_id()),
            codename: Set(codename),
            name: Set(name),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, "A permission with that codename already exists.", None))
    }

    /// Looks the codename up and creates it, named after itself unless `name` is given, when missing.
    pub async fn ensure_permission(&self, codename: &str, name: Option<String>) -> Result<PermissionModel, AppError> {
        let existing = Permission::find()
            .filter(Column::Codename.eq(codename))
            .one(&self.db)
            .await?;
        match existing {
            Some(permission) => Ok(permission),
            None => {
                let name = name.unwrap_or_else(|| codename.to_string());
                self.create_permission(codename.to_string(), name).await
            }
        }
    }

    pub async fn grant_permission(&self, user_id: Uuid, permission_id: Uuid) -> Result<(), AppError> {
        Grant::insert(GrantActive {
            user_id: Set(user_id),
            permission_id: Set(permission_id),
        })
        .exec(&self.db)
        .await
        .map_err(|e| write_error(e, "User already has that permission.", None))?;
        Ok(())
    }

    /// Codenames granted directly to the user, alphabetical.
    pub async fn list_user_permission_codenames(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let user = self.get_user_by_id(&user_id).await?;
        Ok(user
            .find_related(Permission)
            .order_by_asc(Column::Codename)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| p.codename)
            .collect())
    }
}
