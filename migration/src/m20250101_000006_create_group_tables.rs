use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum AuthGroup {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum UserGroup {
    Table,
    UserId,
    GroupId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(AuthGroup::Table)
                .if_not_exists()
                .col(ColumnDef::new(AuthGroup::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(AuthGroup::Name).string_len(150).not_null().unique_key())
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(UserGroup::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserGroup::UserId).uuid().not_null())
                .col(ColumnDef::new(UserGroup::GroupId).uuid().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_user_group")
                        .col(UserGroup::UserId)
                        .col(UserGroup::GroupId)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_group_user")
                        .from(UserGroup::Table, UserGroup::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_group_group")
                        .from(UserGroup::Table, UserGroup::GroupId)
                        .to(AuthGroup::Table, AuthGroup::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(UserGroup::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(AuthGroup::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
