//! `SeaORM` Entity for student table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub student_id: i32,
    pub roll_number: String,
    pub id_card_number: String,
    pub phone_number: String,
    pub name: String,
    pub email: Option<String>,
    pub year: i32,
    pub section: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
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

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StudentId,
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
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::StudentId => ColumnType::Integer.def(),
            Self::RollNumber => ColumnType::String(StringLen::N(20u32)).def().unique(),
            Self::IdCardNumber => ColumnType::String(StringLen::N(20u32)).def(),
            Self::PhoneNumber => ColumnType::String(StringLen::N(15u32)).def(),
            Self::Name => ColumnType::String(StringLen::N(100u32)).def(),
            Self::Email => ColumnType::String(StringLen::N(120u32)).def().null(),
            Self::Year => ColumnType::Integer.def(),
            Self::Section => ColumnType::String(StringLen::N(10u32)).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::ExamResult => Entity::has_many(super::result::Entity).into(),
        }
    }
}

impl Related<super::result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamResult.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
