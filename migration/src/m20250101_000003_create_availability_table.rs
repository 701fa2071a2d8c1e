use sea_orm_migration::prelude::*;

use crate::m20250101_000002_create_doctor_table::Doctor;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Availability {
    Table,
    Id,
    DoctorId,
    Date,
    StartTime,
    EndTime,
    IsAvailable,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Availability::Table)
                .if_not_exists()
                .col(ColumnDef::new(Availability::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Availability::DoctorId).uuid().not_null())
                .col(ColumnDef::new(Availability::Date).date().not_null())
                .col(ColumnDef::new(Availability::StartTime).time().not_null())
                .col(ColumnDef::new(Availability::EndTime).time().not_null())
                .col(ColumnDef::new(Availability::IsAvailable).boolean().not_null().default(true))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_availability_doctor")
                        .from(Availability::Table, Availability::DoctorId)
                        .to(Doctor::Table, Doctor::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // one row per slot
        m.create_index(
            Index::create()
                .name("uk_availability_slot")
                .table(Availability::Table)
                .col(Availability::DoctorId)
                .col(Availability::Date)
                .col(Availability::StartTime)
                .col(Availability::EndTime)
                .unique()
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_availability_date_start")
                .table(Availability::Table)
                .col(Availability::Date)
                .col(Availability::StartTime)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Availability::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
