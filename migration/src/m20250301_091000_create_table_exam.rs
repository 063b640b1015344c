use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exam::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exam::ExamId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exam::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Exam::ExamType).string_len(20).not_null())
                    .col(ColumnDef::new(Exam::Year).integer().not_null())
                    .col(ColumnDef::new(Exam::Semester).integer().not_null())
                    .col(ColumnDef::new(Exam::Subject).string_len(100).not_null())
                    .col(ColumnDef::new(Exam::TotalMarks).double().not_null())
                    .col(ColumnDef::new(Exam::PassingMarks).double().not_null())
                    .col(ColumnDef::new(Exam::ExamDate).date().null())
                    .col(ColumnDef::new(Exam::ResultPublishedAt).timestamp().null())
                    .col(
                        ColumnDef::new(Exam::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exam::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Exam {
    Table,
    ExamId,
    Name,
    ExamType,
    Year,
    Semester,
    Subject,
    TotalMarks,
    PassingMarks,
    ExamDate,
    ResultPublishedAt,
    CreatedAt,
}
