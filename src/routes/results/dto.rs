use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::ResultStatus;
use crate::entities::{exam, result, student};
use crate::routes::students::dto::StudentResponse;
use crate::services::grading::{self, LETTER_GRADES};
use crate::services::result_lookup::ResultSummary;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateResultRequest {
    #[schema(example = "2023001")]
    pub roll_number: String,
    #[schema(example = 1)]
    pub exam_id: i32,
    #[schema(example = 78.5)]
    pub marks_obtained: f64,
    #[schema(example = "A")]
    pub grade: Option<String>,
    /// Pass, Fail or Absent; defaults to Pass
    #[schema(example = "Pass")]
    pub status: Option<String>,
    pub remarks: Option<String>,
}

/// A manual entry after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidResultEntry {
    pub roll_number: String,
    pub marks_obtained: f64,
    pub grade: Option<String>,
    pub status: ResultStatus,
    pub remarks: Option<String>,
}

impl CreateResultRequest {
    pub fn validate(&self) -> Result<ValidResultEntry, String> {
        let roll_number = self.roll_number.trim();
        if roll_number.is_empty() || roll_number.chars().count() > 20 {
            return Err("roll_number must be between 1 and 20 characters".to_string());
        }
        if !self.marks_obtained.is_finite() || self.marks_obtained < 0.0 {
            return Err("marks_obtained must be a number greater than or equal to 0".to_string());
        }

        let grade = self
            .grade
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty());
        if grade.is_some_and(|g| !LETTER_GRADES.contains(&g)) {
            return Err(format!(
                "grade must be one of: {}",
                LETTER_GRADES.join(", ")
            ));
        }

        let status = match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(status) => status.parse()?,
            None => ResultStatus::Pass,
        };

        Ok(ValidResultEntry {
            roll_number: roll_number.to_string(),
            marks_obtained: self.marks_obtained,
            grade: grade.map(str::to_string),
            status,
            remarks: self
                .remarks
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResultResponse {
    pub result_id: i32,
    pub student_id: i32,
    pub exam_id: i32,
    pub marks_obtained: f64,
    pub grade: Option<String>,
    pub status: ResultStatus,
    pub remarks: Option<String>,
    pub percentage: f64,
    pub is_pass: bool,
    pub created_at: NaiveDateTime,
}

impl ResultResponse {
    pub fn from_models(result: result::Model, exam: &exam::Model) -> Self {
        Self {
            percentage: grading::round2(grading::percentage(&result, exam)),
            is_pass: grading::is_pass(&result, exam),
            result_id: result.result_id,
            student_id: result.student_id,
            exam_id: result.exam_id,
            marks_obtained: result.marks_obtained,
            grade: result.grade,
            status: result.status,
            remarks: result.remarks,
            created_at: result.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamResultRow {
    pub roll_number: String,
    pub student_name: String,
    #[serde(flatten)]
    pub result: ResultResponse,
}

impl ExamResultRow {
    pub fn from_models(result: result::Model, student: student::Model, exam: &exam::Model) -> Self {
        Self {
            roll_number: student.roll_number,
            student_name: student.name,
            result: ResultResponse::from_models(result, exam),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamResultListResponse {
    pub exam_id: i32,
    pub exam_name: String,
    pub results: Vec<ExamResultRow>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LookupRequest {
    #[schema(example = "2023001")]
    pub roll_number: String,
    #[schema(example = "ID001")]
    pub id_card_number: Option<String>,
    #[schema(example = "9876543210")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LookupResponse {
    pub found: bool,
    pub message: Option<String>,
    pub student: Option<StudentResponse>,
    pub results: Vec<ResultSummary>,
}
