use crate::entities::student;
use crate::services::result_lookup::SecondaryCredential;
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub roll_number: String,
    pub id_card_number: String,
    pub phone_number: String,
    pub name: String,
    pub email: Option<String>,
    pub year: i32,
    pub section: Option<String>,
}

pub struct StudentRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, student_id: i32) -> Result<Option<student::Model>> {
        let student = student::Entity::find_by_id(student_id).one(self.db).await?;
        Ok(student)
    }

    pub async fn find_by_roll_number(&self, roll_number: &str) -> Result<Option<student::Model>> {
        let student = student::Entity::find()
            .filter(student::Column::RollNumber.eq(roll_number))
            .one(self.db)
            .await?;
        Ok(student)
    }

    /// Every student whose roll number and chosen secondary credential both match exactly.
    pub async fn find_by_credentials(
        &self,
        roll_number: &str,
        credential: &SecondaryCredential,
    ) -> Result<Vec<student::Model>> {
        let query = student::Entity::find().filter(student::Column::RollNumber.eq(roll_number));

        let query = match credential {
            SecondaryCredential::IdCardNumber(id_card) => {
                query.filter(student::Column::IdCardNumber.eq(id_card.as_str()))
            }
            SecondaryCredential::PhoneNumber(phone) => {
                query.filter(student::Column::PhoneNumber.eq(phone.as_str()))
            }
        };

        let students = query.all(self.db).await?;
        Ok(students)
    }

    /// One page of students ordered by roll number, plus the total count.
    /// `page` starts at 1.
    pub async fn find_page(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<student::Model>, u64)> {
        let paginator = student::Entity::find()
            .order_by_asc(student::Column::RollNumber)
            .paginate(self.db, page_size);

        let total = paginator.num_items().await?;
        let students = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((students, total))
    }

    pub async fn count(&self) -> Result<u64> {
        let total = student::Entity::find().count(self.db).await?;
        Ok(total)
    }

    pub async fn create(&self, new_student: NewStudent) -> Result<student::Model> {
        let student_model = student::ActiveModel {
            roll_number: Set(new_student.roll_number),
            id_card_number: Set(new_student.id_card_number),
            phone_number: Set(new_student.phone_number),
            name: Set(new_student.name),
            email: Set(new_student.email),
            year: Set(new_student.year),
            section: Set(new_student.section),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = student_model.insert(self.db).await?;
        Ok(result)
    }
}
