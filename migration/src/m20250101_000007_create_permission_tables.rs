use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum AuthPermission {
    Table,
    Id,
    Codename,
    Name,
}

#[derive(DeriveIden)]
enum UserPermission {
    Table,
    UserId,
    PermissionId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(AuthPermission::Table)
                .if_not_exists()
                .col(ColumnDef::new(AuthPermission::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(AuthPermission::Codename).string_len(100).not_null().unique_key())
                .col(ColumnDef::new(AuthPermission::Name).string_len(255).not_null())
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(UserPermission::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserPermission::UserId).uuid().not_null())
                .col(ColumnDef::new(UserPermission::PermissionId).uuid().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_user_permission")
                        .col(UserPermission::UserId)
                        .col(UserPermission::PermissionId)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_permission_user")
                        .from(UserPermission::Table, UserPermission::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_permission_permission")
                        .from(UserPermission::Table, UserPermission::PermissionId)
                        .to(AuthPermission::Table, AuthPermission::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(UserPermission::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(AuthPermission::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
