use crate::entities::exam;
use crate::entities::sea_orm_active_enums::ExamType;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

#[derive(Debug, Clone)]
pub struct NewExam {
    pub name: String,
    pub exam_type: ExamType,
    pub year: i32,
    pub semester: i32,
    pub subject: String,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub exam_date: Option<NaiveDate>,
}

pub struct ExamRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ExamRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, exam_id: i32) -> Result<Option<exam::Model>> {
        let exam = exam::Entity::find_by_id(exam_id).one(self.db).await?;
        Ok(exam)
    }

    /// Latest academic year and semester first. `page` starts at 1.
    pub async fn find_page(&self, page: u64, page_size: u64) -> Result<(Vec<exam::Model>, u64)> {
        let paginator = exam::Entity::find()
            .order_by_desc(exam::Column::Year)
            .order_by_desc(exam::Column::Semester)
            .order_by_asc(exam::Column::ExamId)
            .paginate(self.db, page_size);

        let total = paginator.num_items().await?;
        let exams = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((exams, total))
    }

    pub async fn count(&self) -> Result<u64> {
        let total = exam::Entity::find().count(self.db).await?;
        Ok(total)
    }

    pub async fn create(&self, new_exam: NewExam) -> Result<exam::Model> {
        let exam_model = exam::ActiveModel {
            name: Set(new_exam.name),
            exam_type: Set(new_exam.exam_type),
            year: Set(new_exam.year),
            semester: Set(new_exam.semester),
            subject: Set(new_exam.subject),
            total_marks: Set(new_exam.total_marks),
            passing_marks: Set(new_exam.passing_marks),
            exam_date: Set(new_exam.exam_date),
            result_published_at: Set(None),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = exam_model.insert(self.db).await?;
        Ok(result)
    }
}
