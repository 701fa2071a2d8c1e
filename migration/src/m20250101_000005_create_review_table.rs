use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;
use crate::m20250101_000002_create_doctor_table::Doctor;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    UserId,
    DoctorId,
    Rating,
    Comment,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Review::Table)
                .if_not_exists()
                .col(ColumnDef::new(Review::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Review::UserId).uuid().not_null())
                .col(ColumnDef::new(Review::DoctorId).uuid().not_null())
                .col(
                    ColumnDef::new(Review::Rating)
                        .integer()
                        .not_null()
                        .check(Expr::col(Review::Rating).between(1, 5)),
                )
                .col(ColumnDef::new(Review::Comment).text().null())
                .col(
                    ColumnDef::new(Review::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_review_user")
                        .from(Review::Table, Review::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_review_doctor")
                        .from(Review::Table, Review::DoctorId)
                        .to(Doctor::Table, Doctor::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // one review per user per doctor
        m.create_index(
            Index::create()
                .name("uk_review_user_doctor")
                .table(Review::Table)
                .col(Review::UserId)
                .col(Review::DoctorId)
                .unique()
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_review_created_at")
                .table(Review::Table)
                .col(Review::CreatedAt)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Review::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
