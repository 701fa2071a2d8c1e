pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_doctor_table;
mod m20250101_000003_create_availability_table;
mod m20250101_000004_create_appointment_table;
mod m20250101_000005_create_review_table;
mod m20250101_000006_create_group_tables;
mod m20250101_000007_create_permission_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_doctor_table::Migration),
            Box::new(m20250101_000003_create_availability_table::Migration),
            Box::new(m20250101_000004_create_appointment_table::Migration),
            Box::new(m20250101_000005_create_review_table::Migration),
            Box::new(m20250101_000006_create_group_tables::Migration),
            Box::new(m20250101_000007_create_permission_tables::Migration),
        ]
    }
}
