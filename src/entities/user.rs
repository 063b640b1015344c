//! `SeaORM` Entity for user table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "user"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub user_id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    UserId,
    Username,
    Email,
    PasswordHash,
    IsAdmin,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    UserId,
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
            Self::UserId => ColumnType::Integer.def(),
            Self::Username => ColumnType::String(StringLen::N(80u32)).def().unique(),
            Self::Email => ColumnType::String(StringLen::N(120u32)).def().unique(),
            Self::PasswordHash => ColumnType::String(StringLen::N(128u32)).def(),
            Self::IsAdmin => ColumnType::Boolean.def(),
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
