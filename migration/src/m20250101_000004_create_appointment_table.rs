use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;
use crate::m20250101_000002_create_doctor_table::Doctor;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Appointment {
    Table,
    Id,
    UserId,
    DoctorId,
    Date,
    Time,
    Status,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Appointment::Table)
                .if_not_exists()
                .col(ColumnDef::new(Appointment::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Appointment::UserId).uuid().not_null())
                .col(ColumnDef::new(Appointment::DoctorId).uuid().not_null())
                .col(ColumnDef::new(Appointment::Date).date().not_null())
                .col(ColumnDef::new(Appointment::Time).time().not_null())
                .col(
                    ColumnDef::new(Appointment::Status)
                        .string_len(20)
                        .not_null()
                        .default("pending")
                        .check(Expr::col(Appointment::Status).is_in([
                            "pending",
                            "confirmed",
                            "completed",
                            "cancelled",
                        ])),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_appointment_user")
                        .from(Appointment::Table, Appointment::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_appointment_doctor")
                        .from(Appointment::Table, Appointment::DoctorId)
                        .to(Doctor::Table, Doctor::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_appointment_user")
                .table(Appointment::Table)
                .col(Appointment::UserId)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_appointment_doctor")
                .table(Appointment::Table)
                .col(Appointment::DoctorId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Appointment::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
