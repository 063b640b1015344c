use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResultUpload::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResultUpload::ResultUploadId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResultUpload::FileName).string_len(255).not_null())
                    .col(ColumnDef::new(ResultUpload::ExamId).integer().not_null())
                    .col(ColumnDef::new(ResultUpload::UploadedBy).integer().not_null())
                    .col(
                        ColumnDef::new(ResultUpload::TotalRecords)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResultUpload::SuccessfulRecords)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResultUpload::FailedRecords)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResultUpload::Status)
                            .string_len(32)
                            .not_null()
                            .default("Processing"),
                    )
                    .col(ColumnDef::new(ResultUpload::ErrorLog).text().null())
                    .col(
                        ColumnDef::new(ResultUpload::UploadedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_result_upload_exam")
                            .from_tbl(ResultUpload::Table)
                            .from_col(ResultUpload::ExamId)
                            .to_tbl(Exam::Table)
                            .to_col(Exam::ExamId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_result_upload_user")
                            .from_tbl(ResultUpload::Table)
                            .from_col(ResultUpload::UploadedBy)
                            .to_tbl(User::Table)
                            .to_col(User::UserId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_result_upload_uploaded_at")
                    .table(ResultUpload::Table)
                    .col(ResultUpload::UploadedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_result_upload_uploaded_at")
                    .table(ResultUpload::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ResultUpload::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ResultUpload {
    Table,
    ResultUploadId,
    FileName,
    ExamId,
    UploadedBy,
    TotalRecords,
    SuccessfulRecords,
    FailedRecords,
    Status,
    ErrorLog,
    UploadedAt,
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
