//! Student-facing result lookup by roll number plus one secondary credential.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::ResultStatus;
use crate::entities::{exam, result, student};
use crate::repositories::{ResultRepository, StudentRepository};
use crate::services::grading;

pub const ROLL_NUMBER_LENGTH: (usize, usize) = (5, 20);
pub const ID_CARD_NUMBER_LENGTH: (usize, usize) = (5, 20);
pub const PHONE_NUMBER_LENGTH: (usize, usize) = (10, 15);

/// Generic message for any failed match. Wrong roll number and wrong
/// credential must read the same.
pub const NOT_FOUND_MESSAGE: &str =
    "Invalid credentials. Please check your roll number and verification details.";
pub const NO_RESULTS_MESSAGE: &str = "No results found for this student.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecondaryCredential {
    IdCardNumber(String),
    PhoneNumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("roll_number is required")]
    MissingRollNumber,
    #[error("Please provide either id_card_number or phone_number")]
    MissingSecondary,
    #[error("{field} must be between {min} and {max} characters")]
    InvalidLength {
        field: &'static str,
        min: usize,
        max: usize,
    },
}

impl CredentialError {
    /// Request fields the error refers to.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            CredentialError::MissingRollNumber => vec!["roll_number"],
            CredentialError::MissingSecondary => vec!["id_card_number", "phone_number"],
            CredentialError::InvalidLength { field, .. } => vec![*field],
        }
    }
}

/// A validated lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub roll_number: String,
    pub credential: SecondaryCredential,
}

impl LookupQuery {
    /// Blank values count as absent. When both credentials are given the ID
    /// card number wins.
    pub fn parse(
        roll_number: &str,
        id_card_number: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<Self, CredentialError> {
        let roll_number = present(Some(roll_number)).ok_or(CredentialError::MissingRollNumber)?;
        check_length("roll_number", roll_number, ROLL_NUMBER_LENGTH)?;

        let credential = match (present(id_card_number), present(phone_number)) {
            (Some(id_card), _) => {
                check_length("id_card_number", id_card, ID_CARD_NUMBER_LENGTH)?;
                SecondaryCredential::IdCardNumber(id_card.to_string())
            }
            (None, Some(phone)) => {
                check_length("phone_number", phone, PHONE_NUMBER_LENGTH)?;
                SecondaryCredential::PhoneNumber(phone.to_string())
            }
            (None, None) => return Err(CredentialError::MissingSecondary),
        };

        Ok(Self {
            roll_number: roll_number.to_string(),
            credential,
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_length(
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
) -> Result<(), CredentialError> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(CredentialError::InvalidLength { field, min, max })
    }
}

/// One result line as shown to the student.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResultSummary {
    pub exam_name: String,
    pub subject: String,
    pub year: i32,
    pub semester: i32,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub grade: Option<String>,
    pub status: ResultStatus,
    pub is_pass: bool,
    pub remarks: Option<String>,
}

impl ResultSummary {
    pub fn from_models(result: &result::Model, exam: &exam::Model) -> Self {
        Self {
            exam_name: exam.name.clone(),
            subject: exam.subject.clone(),
            year: exam.year,
            semester: exam.semester,
            marks_obtained: result.marks_obtained,
            total_marks: exam.total_marks,
            percentage: grading::round2(grading::percentage(result, exam)),
            grade: result.grade.clone(),
            status: result.status,
            is_pass: grading::is_pass(result, exam),
            remarks: result.remarks.clone(),
        }
    }
}

/// Orders by exam year, semester, then exam name.
pub fn summarize(rows: &[(result::Model, exam::Model)]) -> Vec<ResultSummary> {
    let mut summaries: Vec<ResultSummary> = rows
        .iter()
        .map(|(result, exam)| ResultSummary::from_models(result, exam))
        .collect();
    summaries.sort_by(|a, b| {
        (a.year, a.semester, &a.exam_name).cmp(&(b.year, b.semester, &b.exam_name))
    });
    summaries
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    NotFound,
    NoResults(student::Model),
    Found {
        student: student::Model,
        results: Vec<ResultSummary>,
    },
}

/// Resolves the query to exactly one student. Zero or several matches are
/// both reported as [`LookupOutcome::NotFound`].
pub async fn lookup_results<C: ConnectionTrait>(
    db: &C,
    query: &LookupQuery,
) -> anyhow::Result<LookupOutcome> {
    let mut students = StudentRepository::new(db)
        .find_by_credentials(&query.roll_number, &query.credential)
        .await?;

    if students.len() != 1 {
        if students.len() > 1 {
            tracing::warn!(
                matches = students.len(),
                "Credential lookup matched more than one student"
            );
        }
        return Ok(LookupOutcome::NotFound);
    }
    let Some(student) = students.pop() else {
        return Ok(LookupOutcome::NotFound);
    };

    let rows = ResultRepository::new(db)
        .find_with_exams_by_student(student.student_id)
        .await?;
    if rows.is_empty() {
        return Ok(LookupOutcome::NoResults(student));
    }

    Ok(LookupOutcome::Found {
        student,
        results: summarize(&rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::grading::fixtures;

    #[test]
    fn test_parse_prefers_id_card_when_both_given() {
        let query = LookupQuery::parse("2023001", Some("ID001"), Some("9876543210")).unwrap();
        assert_eq!(
            query.credential,
            SecondaryCredential::IdCardNumber("ID001".to_string())
        );
    }

    #[test]
    fn test_parse_falls_back_to_phone_when_id_card_blank() {
        let query = LookupQuery::parse(" 2023001 ", Some("   "), Some("9876543210")).unwrap();
        assert_eq!(query.roll_number, "2023001");
        assert_eq!(
            query.credential,
            SecondaryCredential::PhoneNumber("9876543210".to_string())
        );
    }

    #[test]
    fn test_parse_requires_a_secondary_credential() {
        let err = LookupQuery::parse("2023001", None, Some("")).unwrap_err();
        assert_eq!(err, CredentialError::MissingSecondary);
        assert_eq!(err.fields(), vec!["id_card_number", "phone_number"]);
    }

    #[test]
    fn test_parse_checks_lengths() {
        assert_eq!(
            LookupQuery::parse("2023", Some("ID001"), None).unwrap_err(),
            CredentialError::InvalidLength {
                field: "roll_number",
                min: 5,
                max: 20
            }
        );
        assert_eq!(
            LookupQuery::parse("2023001", None, Some("12345")).unwrap_err(),
            CredentialError::InvalidLength {
                field: "phone_number",
                min: 10,
                max: 15
            }
        );
        assert_eq!(
            LookupQuery::parse("", Some("ID001"), None).unwrap_err(),
            CredentialError::MissingRollNumber
        );
    }

    #[test]
    fn test_summarize_orders_by_year_semester_and_name() {
        let mut late = fixtures::exam(100.0, 40.0);
        late.name = "Physiology".to_string();
        late.year = 2;
        late.semester = 3;

        let mut early_b = fixtures::exam(100.0, 40.0);
        early_b.name = "Biochemistry".to_string();

        let mut early_a = fixtures::exam(50.0, 20.0);
        early_a.name = "Anatomy".to_string();

        let rows = vec![
            (fixtures::result(1, 70.0, ResultStatus::Pass, Some("B")), late),
            (fixtures::result(2, 30.0, ResultStatus::Fail, None), early_b),
            (fixtures::result(3, 42.0, ResultStatus::Pass, Some("A")), early_a),
        ];

        let summaries = summarize(&rows);
        let names: Vec<&str> = summaries.iter().map(|s| s.exam_name.as_str()).collect();
        assert_eq!(names, vec!["Anatomy", "Biochemistry", "Physiology"]);

        assert_eq!(summaries[0].percentage, 84.0);
        assert!(summaries[0].is_pass);
        assert!(!summaries[1].is_pass);
    }
}
