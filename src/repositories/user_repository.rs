use crate::entities::user;
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<user::Model>> {
        let user = user::Entity::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
        is_admin: bool,
    ) -> Result<user::Model> {
        let user_model = user::ActiveModel {
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            is_admin: Set(is_admin),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = user_model.insert(self.db).await?;
        Ok(result)
    }
}
