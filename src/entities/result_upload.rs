//! `SeaORM` Entity for result_upload table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::UploadStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "result_upload"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub result_upload_id: i32,
    pub file_name: String,
    pub exam_id: i32,
    pub uploaded_by: i32,
    pub total_records: i32,
    pub successful_records: i32,
    pub failed_records: i32,
    pub status: UploadStatus,
    pub error_log: Option<String>,
    pub uploaded_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
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

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    ResultUploadId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Exam,
    User,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::ResultUploadId => ColumnType::Integer.def(),
            Self::FileName => ColumnType::String(StringLen::N(255u32)).def(),
            Self::ExamId => ColumnType::Integer.def(),
            Self::UploadedBy => ColumnType::Integer.def(),
            Self::TotalRecords => ColumnType::Integer.def(),
            Self::SuccessfulRecords => ColumnType::Integer.def(),
            Self::FailedRecords => ColumnType::Integer.def(),
            Self::Status => UploadStatus::db_type(),
            Self::ErrorLog => ColumnType::Text.def().null(),
            Self::UploadedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Exam => Entity::belongs_to(super::exam::Entity)
                .from(Column::ExamId)
                .to(super::exam::Column::ExamId)
                .into(),
            Self::User => Entity::belongs_to(super::user::Entity)
                .from(Column::UploadedBy)
                .to(super::user::Column::UserId)
                .into(),
        }
    }
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
