//! `SeaORM` Entity for exam table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ExamType;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "exam"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub exam_id: i32,
    pub name: String,
    pub exam_type: ExamType,
    pub year: i32,
    pub semester: i32,
    pub subject: String,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub exam_date: Option<Date>,
    pub result_published_at: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
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

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    ExamId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ExamResult,
    ResultUpload,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::ExamId => ColumnType::Integer.def(),
            Self::Name => ColumnType::String(StringLen::N(100u32)).def(),
            Self::ExamType => ExamType::db_type(),
            Self::Year => ColumnType::Integer.def(),
            Self::Semester => ColumnType::Integer.def(),
            Self::Subject => ColumnType::String(StringLen::N(100u32)).def(),
            Self::TotalMarks => ColumnType::Double.def(),
            Self::PassingMarks => ColumnType::Double.def(),
            Self::ExamDate => ColumnType::Date.def().null(),
            Self::ResultPublishedAt => ColumnType::DateTime.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::ExamResult => Entity::has_many(super::result::Entity).into(),
            Self::ResultUpload => Entity::has_many(super::result_upload::Entity).into(),
        }
    }
}

impl Related<super::result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamResult.def()
    }
}

impl Related<super::result_upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResultUpload.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
