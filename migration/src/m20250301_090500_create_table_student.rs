use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::StudentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Student::RollNumber)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Student::IdCardNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Student::PhoneNumber).string_len(15).not_null())
                    .col(ColumnDef::new(Student::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Student::Email).string_len(120).null())
                    .col(ColumnDef::new(Student::Year).integer().not_null())
                    .col(ColumnDef::new(Student::Section).string_len(10).null())
                    .col(
                        ColumnDef::new(Student::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Secondary credentials are matched together with the roll number on lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_student_id_card_number")
                    .table(Student::Table)
                    .col(Student::IdCardNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_phone_number")
                    .table(Student::Table)
                    .col(Student::PhoneNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_phone_number")
                    .table(Student::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_id_card_number")
                    .table(Student::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
    RollNumber,
    IdCardNumber,
    PhoneNumber,
    Name,
    Email,
    Year,
    Section,
    CreatedAt,
}
