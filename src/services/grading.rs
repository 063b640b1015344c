//! Values derived from a result together with the exam it belongs to.

use crate::entities::sea_orm_active_enums::ResultStatus;
use crate::entities::{exam, result};

/// Letter grades offered for manual result entry.
pub const LETTER_GRADES: [&str; 8] = ["A+", "A", "B+", "B", "C+", "C", "D", "F"];

pub fn percentage(result: &result::Model, exam: &exam::Model) -> f64 {
    percentage_of(result.marks_obtained, exam.total_marks)
}

pub fn percentage_of(marks_obtained: f64, total_marks: f64) -> f64 {
    if total_marks > 0.0 {
        marks_obtained / total_marks * 100.0
    } else {
        0.0
    }
}

/// A result passes only when it is marked `Pass` and reaches the exam's passing marks.
pub fn is_pass(result: &result::Model, exam: &exam::Model) -> bool {
    passes(result.status, result.marks_obtained, exam.passing_marks)
}

pub fn passes(status: ResultStatus, marks_obtained: f64, passing_marks: f64) -> bool {
    status == ResultStatus::Pass && marks_obtained >= passing_marks
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::entities::sea_orm_active_enums::{ExamType, ResultStatus};
    use crate::entities::{exam, result};

    pub fn exam(total_marks: f64, passing_marks: f64) -> exam::Model {
        let created_at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap();
        exam::Model {
            exam_id: 1,
            name: "Anatomy Final".to_string(),
            exam_type: ExamType::Final,
            year: 1,
            semester: 2,
            subject: "Anatomy".to_string(),
            total_marks,
            passing_marks,
            exam_date: None,
            result_published_at: None,
            created_at,
        }
    }

    pub fn result(
        result_id: i32,
        marks_obtained: f64,
        status: ResultStatus,
        grade: Option<&str>,
    ) -> result::Model {
        let created_at = NaiveDate::from_ymd_opt(2024, 2, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        result::Model {
            result_id,
            student_id: result_id,
            exam_id: 1,
            marks_obtained,
            grade: grade.map(str::to_string),
            status,
            remarks: None,
            uploaded_by: 1,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;

    #[test]
    fn test_percentage_of_total_marks() {
        let exam = fixtures::exam(50.0, 25.0);
        let result = fixtures::result(1, 42.0, ResultStatus::Pass, None);
        assert!((percentage(&result, &exam) - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_with_zero_total_marks_is_zero() {
        let exam = fixtures::exam(0.0, 0.0);
        let result = fixtures::result(1, 42.0, ResultStatus::Pass, None);
        assert_eq!(percentage(&result, &exam), 0.0);
    }

    #[test]
    fn test_is_pass_requires_status_and_passing_marks() {
        let exam = fixtures::exam(100.0, 50.0);

        assert!(is_pass(&fixtures::result(1, 50.0, ResultStatus::Pass, None), &exam));
        assert!(!is_pass(&fixtures::result(2, 49.5, ResultStatus::Pass, None), &exam));
        assert!(!is_pass(&fixtures::result(3, 85.0, ResultStatus::Fail, None), &exam));
        assert!(!is_pass(&fixtures::result(4, 85.0, ResultStatus::Absent, None), &exam));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(100.0 / 3.0), 33.33);
        assert_eq!(round2(66.666), 66.67);
        assert_eq!(round2(65.0), 65.0);
    }
}
