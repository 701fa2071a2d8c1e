use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Doctor::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Doctor::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Doctor::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Doctor::Specialization).string_len(100).not_null())
                    .col(ColumnDef::new(Doctor::Bio).text().not_null())
                    .col(ColumnDef::new(Doctor::ContactInfo).text().not_null())
                    .col(ColumnDef::new(Doctor::ProfilePicture).string().null())
                    .col(ColumnDef::new(Doctor::ClinicAddress).text().not_null())
                    .col(
                        ColumnDef::new(Doctor::Rating)
                            .decimal_len(3, 2)
                            .not_null()
                            .default(0.0)
                    )
                    .col(
                        ColumnDef::new(Doctor::PricePerAppointment)
                            .decimal_len(6, 2)
                            .not_null()
                    )
                    .to_owned()
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Doctor::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Doctor {
    Table,
    Id,
    Name,
    Specialization,
    Bio,
    ContactInfo,
    ProfilePicture,
    ClinicAddress,
    Rating,
    PricePerAppointment,
}
