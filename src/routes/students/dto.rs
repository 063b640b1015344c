use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::student;
use crate::repositories::NewStudent;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "2023001")]
    pub roll_number: String,
    #[schema(example = "ID001")]
    pub id_card_number: String,
    #[schema(example = "9876543210")]
    pub phone_number: String,
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: Option<String>,
    #[schema(example = 1)]
    pub year: i32,
    #[schema(example = "A")]
    pub section: Option<String>,
}

fn required(field: &str, value: &str, max: usize) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} is required", field));
    }
    if value.chars().count() > max {
        return Err(format!("{} must be at most {} characters", field, max));
    }
    Ok(value.to_string())
}

fn optional(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => required(field, v, max).map(Some),
        None => Ok(None),
    }
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<NewStudent, String> {
        let email = optional("email", self.email.as_deref(), 120)?;
        if email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err("email must be a valid email address".to_string());
        }
        if !(1..=5).contains(&self.year) {
            return Err("year must be between 1 and 5".to_string());
        }

        Ok(NewStudent {
            roll_number: required("roll_number", &self.roll_number, 20)?,
            id_card_number: required("id_card_number", &self.id_card_number, 20)?,
            phone_number: required("phone_number", &self.phone_number, 15)?,
            name: required("name", &self.name, 100)?,
            email,
            year: self.year,
            section: optional("section", self.section.as_deref(), 10)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub student_id: i32,
    pub roll_number: String,
    pub id_card_number: String,
    pub phone_number: String,
    pub name: String,
    pub email: Option<String>,
    pub year: i32,
    pub section: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<student::Model> for StudentResponse {
    fn from(s: student::Model) -> Self {
        Self {
            student_id: s.student_id,
            roll_number: s.roll_number,
            id_card_number: s.id_card_number,
            phone_number: s.phone_number,
            name: s.name,
            email: s.email,
            year: s.year,
            section: s.section,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            roll_number: " 2023001 ".to_string(),
            id_card_number: "ID001".to_string(),
            phone_number: "9876543210".to_string(),
            name: "Asha Verma".to_string(),
            email: Some("".to_string()),
            year: 1,
            section: Some("A".to_string()),
        }
    }

    #[test]
    fn test_validate_trims_and_normalizes_blank_optionals() {
        let student = request().validate().unwrap();
        assert_eq!(student.roll_number, "2023001");
        assert_eq!(student.email, None);
        assert_eq!(student.section.as_deref(), Some("A"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        let mut req = request();
        req.year = 6;
        assert!(req.validate().is_err());

        let mut req = request();
        req.phone_number = "1234567890123456".to_string();
        assert_eq!(
            req.validate().unwrap_err(),
            "phone_number must be at most 15 characters"
        );

        let mut req = request();
        req.email = Some("not-an-email".to_string());
        assert!(req.validate().is_err());

        let mut req = request();
        req.name = "  ".to_string();
        assert_eq!(req.validate().unwrap_err(), "name is required");
    }
}
