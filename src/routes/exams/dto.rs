use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::exam;
use crate::entities::sea_orm_active_enums::ExamType;
use crate::repositories::NewExam;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExamRequest {
    #[schema(example = "First Year Final")]
    pub name: String,
    pub exam_type: ExamType,
    #[schema(example = 1)]
    pub year: i32,
    #[schema(example = 2)]
    pub semester: i32,
    #[schema(example = "Anatomy")]
    pub subject: String,
    #[schema(example = 100.0)]
    pub total_marks: f64,
    #[schema(example = 40.0)]
    pub passing_marks: f64,
    #[schema(example = "2024-05-20")]
    pub exam_date: Option<NaiveDate>,
}

impl CreateExamRequest {
    pub fn validate(&self) -> Result<NewExam, String> {
        let name = self.name.trim();
        let subject = self.subject.trim();

        if name.is_empty() || name.chars().count() > 100 {
            return Err("name must be between 1 and 100 characters".to_string());
        }
        if subject.is_empty() || subject.chars().count() > 100 {
            return Err("subject must be between 1 and 100 characters".to_string());
        }
        if !(1..=5).contains(&self.year) {
            return Err("year must be between 1 and 5".to_string());
        }
        if !(1..=10).contains(&self.semester) {
            return Err("semester must be between 1 and 10".to_string());
        }
        if !self.total_marks.is_finite() || self.total_marks < 1.0 {
            return Err("total_marks must be at least 1".to_string());
        }
        if !self.passing_marks.is_finite() || self.passing_marks < 1.0 {
            return Err("passing_marks must be at least 1".to_string());
        }
        if self.passing_marks > self.total_marks {
            return Err("passing_marks cannot exceed total_marks".to_string());
        }

        Ok(NewExam {
            name: name.to_string(),
            exam_type: self.exam_type,
            year: self.year,
            semester: self.semester,
            subject: subject.to_string(),
            total_marks: self.total_marks,
            passing_marks: self.passing_marks,
            exam_date: self.exam_date,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamResponse {
    pub exam_id: i32,
    pub name: String,
    pub exam_type: ExamType,
    pub year: i32,
    pub semester: i32,
    pub subject: String,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub exam_date: Option<NaiveDate>,
    pub result_published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<exam::Model> for ExamResponse {
    fn from(e: exam::Model) -> Self {
        Self {
            exam_id: e.exam_id,
            name: e.name,
            exam_type: e.exam_type,
            year: e.year,
            semester: e.semester,
            subject: e.subject,
            total_marks: e.total_marks,
            passing_marks: e.passing_marks,
            exam_date: e.exam_date,
            result_published_at: e.result_published_at,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamListResponse {
    pub exams: Vec<ExamResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateExamRequest {
        CreateExamRequest {
            name: "First Year Final".to_string(),
            exam_type: ExamType::Final,
            year: 1,
            semester: 2,
            subject: "Anatomy".to_string(),
            total_marks: 100.0,
            passing_marks: 40.0,
            exam_date: None,
        }
    }

    #[test]
    fn test_valid_exam() {
        let exam = request().validate().unwrap();
        assert_eq!(exam.exam_type, ExamType::Final);
        assert_eq!(exam.total_marks, 100.0);
    }

    #[test]
    fn test_passing_marks_cannot_exceed_total() {
        let mut req = request();
        req.passing_marks = 120.0;
        assert_eq!(
            req.validate().unwrap_err(),
            "passing_marks cannot exceed total_marks"
        );
    }

    #[test]
    fn test_semester_and_marks_bounds() {
        let mut req = request();
        req.semester = 11;
        assert!(req.validate().is_err());

        let mut req = request();
        req.total_marks = 0.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_exam_type_uses_kebab_case_names() {
        let req: CreateExamRequest = serde_json::from_str(
            r#"{"name":"Mid","exam_type":"mid-term","year":1,"semester":1,"subject":"Anatomy","total_marks":50,"passing_marks":20}"#,
        )
        .unwrap();
        assert_eq!(req.exam_type, ExamType::MidTerm);
        assert_eq!(req.exam_date, None);
    }
}
