use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExamResult::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamResult::ResultId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamResult::StudentId).integer().not_null())
                    .col(ColumnDef::new(ExamResult::ExamId).integer().not_null())
                    .col(ColumnDef::new(ExamResult::MarksObtained).double().not_null())
                    .col(ColumnDef::new(ExamResult::Grade).string_len(5).null())
                    .col(ColumnDef::new(ExamResult::Status).string_len(20).not_null())
                    .col(ColumnDef::new(ExamResult::Remarks).text().null())
                    .col(ColumnDef::new(ExamResult::UploadedBy).integer().not_null())
                    .col(
                        ColumnDef::new(ExamResult::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_result_student")
                            .from_tbl(ExamResult::Table)
                            .from_col(ExamResult::StudentId)
                            .to_tbl(Student::Table)
                            .to_col(Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_result_exam")
                            .from_tbl(ExamResult::Table)
                            .from_col(ExamResult::ExamId)
                            .to_tbl(Exam::Table)
                            .to_col(Exam::ExamId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_result_uploaded_by")
                            .from_tbl(ExamResult::Table)
                            .from_col(ExamResult::UploadedBy)
                            .to_tbl(User::Table)
                            .to_col(User::UserId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One result per student per exam
        manager
            .create_index(
                Index::create()
                    .name("uq_result_student_exam")
                    .table(ExamResult::Table)
                    .col(ExamResult::StudentId)
                    .col(ExamResult::ExamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_result_exam_id")
                    .table(ExamResult::Table)
                    .col(ExamResult::ExamId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_result_exam_id")
                    .table(ExamResult::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_result_student_exam")
                    .table(ExamResult::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ExamResult::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ExamResult {
    #[sea_orm(iden = "result")]
    Table,
    ResultId,
    StudentId,
    ExamId,
    MarksObtained,
    Grade,
    Status,
    Remarks,
    UploadedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
}

#[derive(DeriveIden)]
enum Exam {
    Table,
    ExamId,
}

#[derive(DeriveIden)]
enum User {
    Table,
    UserId,
}
