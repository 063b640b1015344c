use crate::entities::sea_orm_active_enums::ResultStatus;
use crate::entities::{exam, result, student};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct NewResult {
    pub student_id: i32,
    pub exam_id: i32,
    pub marks_obtained: f64,
    pub grade: Option<String>,
    pub status: ResultStatus,
    pub remarks: Option<String>,
    pub uploaded_by: i32,
}

impl NewResult {
    pub fn into_active_model(self) -> result::ActiveModel {
        result::ActiveModel {
            student_id: Set(self.student_id),
            exam_id: Set(self.exam_id),
            marks_obtained: Set(self.marks_obtained),
            grade: Set(self.grade),
            status: Set(self.status),
            remarks: Set(self.remarks),
            uploaded_by: Set(self.uploaded_by),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

pub struct ResultRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResultRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_student_and_exam(
        &self,
        student_id: i32,
        exam_id: i32,
    ) -> Result<Option<result::Model>> {
        let result = result::Entity::find()
            .filter(result::Column::StudentId.eq(student_id))
            .filter(result::Column::ExamId.eq(exam_id))
            .one(self.db)
            .await?;
        Ok(result)
    }

    /// All results of a student with their exams, ordered by exam year, semester and name.
    pub async fn find_with_exams_by_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<(result::Model, exam::Model)>> {
        let rows = result::Entity::find()
            .filter(result::Column::StudentId.eq(student_id))
            .find_also_related(exam::Entity)
            .order_by_asc(exam::Column::Year)
            .order_by_asc(exam::Column::Semester)
            .order_by_asc(exam::Column::Name)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(result, exam)| exam.map(|exam| (result, exam)))
            .collect())
    }

    pub async fn find_by_exam(&self, exam_id: i32) -> Result<Vec<result::Model>> {
        let results = result::Entity::find()
            .filter(result::Column::ExamId.eq(exam_id))
            .all(self.db)
            .await?;
        Ok(results)
    }

    /// One page of an exam's results with their students, ordered by roll number.
    pub async fn find_page_with_students_by_exam(
        &self,
        exam_id: i32,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<(result::Model, student::Model)>, u64)> {
        let paginator = result::Entity::find()
            .filter(result::Column::ExamId.eq(exam_id))
            .find_also_related(student::Entity)
            .order_by_asc(student::Column::RollNumber)
            .paginate(self.db, page_size);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        let rows = rows
            .into_iter()
            .filter_map(|(result, student)| student.map(|student| (result, student)))
            .collect();
        Ok((rows, total))
    }

    pub async fn count(&self) -> Result<u64> {
        let total = result::Entity::find().count(self.db).await?;
        Ok(total)
    }

    pub async fn create(&self, new_result: NewResult) -> Result<result::Model> {
        let result = new_result.into_active_model().insert(self.db).await?;
        Ok(result)
    }

    /// Inserts all rows with a single statement.
    pub async fn insert_many(&self, results: Vec<result::ActiveModel>) -> Result<()> {
        if results.is_empty() {
            return Ok(());
        }
        result::Entity::insert_many(results).exec(self.db).await?;
        Ok(())
    }
}
