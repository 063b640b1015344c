pub use sea_orm_migration::prelude::*;

mod m20250301_090000_create_table_user;
mod m20250301_090500_create_table_student;
mod m20250301_091000_create_table_exam;
mod m20250301_091500_create_table_result;
mod m20250301_092000_create_table_result_upload;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_090000_create_table_user::Migration),
            Box::new(m20250301_090500_create_table_student::Migration),
            Box::new(m20250301_091000_create_table_exam::Migration),
            Box::new(m20250301_091500_create_table_result::Migration),
            Box::new(m20250301_092000_create_table_result_upload::Migration),
        ]
    }
}
