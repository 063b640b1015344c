//! `SeaORM` Entity for result table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ResultStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "result"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub result_id: i32,
    pub student_id: i32,
    pub exam_id: i32,
    pub marks_obtained: f64,
    pub grade: Option<String>,
    pub status: ResultStatus,
    pub remarks: Option<String>,
    pub uploaded_by: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
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

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    ResultId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Exam,
    User,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::ResultId => ColumnType::Integer.def(),
            Self::StudentId => ColumnType::Integer.def(),
            Self::ExamId => ColumnType::Integer.def(),
            Self::MarksObtained => ColumnType::Double.def(),
            Self::Grade => ColumnType::String(StringLen::N(5u32)).def().null(),
            Self::Status => ResultStatus::db_type(),
            Self::Remarks => ColumnType::Text.def().null(),
            Self::UploadedBy => ColumnType::Integer.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::student::Entity)
                .from(Column::StudentId)
                .to(super::student::Column::StudentId)
                .into(),
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

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
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
