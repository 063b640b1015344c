use std::collections::BTreeMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::ResultStatus;
use crate::entities::{exam, result};
use crate::repositories::ResultRepository;
use crate::services::grading;

/// Histogram label for results recorded without a letter grade.
pub const NO_GRADE: &str = "No Grade";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExamStatistics {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub pass_percentage: f64,
    pub avg_marks: f64,
    pub highest_marks: f64,
    pub lowest_marks: f64,
    pub grade_distribution: BTreeMap<String, u64>,
}

/// Absent results count towards the totals but not towards the marks figures.
pub fn compute_statistics(exam: &exam::Model, results: &[result::Model]) -> ExamStatistics {
    let total = results.len() as u64;
    let passed = results
        .iter()
        .filter(|r| grading::is_pass(r, exam))
        .count() as u64;

    let pass_percentage = if total > 0 {
        grading::round2(passed as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    let marks: Vec<f64> = results
        .iter()
        .filter(|r| r.status != ResultStatus::Absent)
        .map(|r| r.marks_obtained)
        .collect();

    let (avg_marks, highest_marks, lowest_marks) = if marks.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let sum: f64 = marks.iter().sum();
        (
            grading::round2(sum / marks.len() as f64),
            marks.iter().copied().fold(f64::MIN, f64::max),
            marks.iter().copied().fold(f64::MAX, f64::min),
        )
    };

    let mut grade_distribution = BTreeMap::new();
    for r in results {
        let label = r.grade.clone().unwrap_or_else(|| NO_GRADE.to_string());
        *grade_distribution.entry(label).or_insert(0) += 1;
    }

    ExamStatistics {
        total,
        passed,
        failed: total - passed,
        pass_percentage,
        avg_marks,
        highest_marks,
        lowest_marks,
        grade_distribution,
    }
}

pub async fn exam_statistics<C: ConnectionTrait>(
    db: &C,
    exam: &exam::Model,
) -> anyhow::Result<ExamStatistics> {
    let results = ResultRepository::new(db).find_by_exam(exam.exam_id).await?;
    Ok(compute_statistics(exam, &results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::grading::fixtures;

    #[test]
    fn test_statistics_exclude_absent_from_marks() {
        let exam = fixtures::exam(100.0, 50.0);
        let results = vec![
            fixtures::result(1, 85.0, ResultStatus::Pass, Some("A")),
            fixtures::result(2, 45.0, ResultStatus::Fail, Some("F")),
            fixtures::result(3, 20.0, ResultStatus::Absent, None),
        ];

        let stats = compute_statistics(&exam, &results);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.pass_percentage, 33.33);
        assert_eq!(stats.avg_marks, 65.0);
        assert_eq!(stats.highest_marks, 85.0);
        assert_eq!(stats.lowest_marks, 45.0);
        assert_eq!(stats.grade_distribution.get("A"), Some(&1));
        assert_eq!(stats.grade_distribution.get("F"), Some(&1));
        assert_eq!(stats.grade_distribution.get(NO_GRADE), Some(&1));
    }

    #[test]
    fn test_statistics_of_empty_exam_are_zero() {
        let stats = compute_statistics(&fixtures::exam(100.0, 50.0), &[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.pass_percentage, 0.0);
        assert_eq!(stats.avg_marks, 0.0);
        assert_eq!(stats.highest_marks, 0.0);
        assert_eq!(stats.lowest_marks, 0.0);
        assert!(stats.grade_distribution.is_empty());
    }

    #[test]
    fn test_statistics_when_everyone_is_absent() {
        let exam = fixtures::exam(100.0, 50.0);
        let results = vec![
            fixtures::result(1, 0.0, ResultStatus::Absent, None),
            fixtures::result(2, 0.0, ResultStatus::Absent, None),
        ];

        let stats = compute_statistics(&exam, &results);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.avg_marks, 0.0);
        assert_eq!(stats.grade_distribution.get(NO_GRADE), Some(&2));
    }
}
