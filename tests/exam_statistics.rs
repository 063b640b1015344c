mod common;

use result_portal::entities::sea_orm_active_enums::ResultStatus;
use result_portal::services::exam_statistics::{NO_GRADE, exam_statistics};

use common::{create_admin, create_exam, create_student, record_result, setup_db};

#[tokio::test]
async fn statistics_are_computed_from_stored_results() {
    let db = setup_db().await;
    let admin = create_admin(&db).await;
    let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
    let other_exam = create_exam(&db, "Physiology Final", 1, 1, 100.0, 50.0).await;

    let alice = create_student(&db, "2023001", "ID001", "+1234567890").await;
    let bob = create_student(&db, "2023002", "ID002", "+1234567891").await;
    let carol = create_student(&db, "2023003", "ID003", "+1234567892").await;

    record_result(&db, &alice, &exam, &admin, 85.0, Some("A"), ResultStatus::Pass).await;
    record_result(&db, &bob, &exam, &admin, 45.0, Some("C"), ResultStatus::Fail).await;
    record_result(&db, &carol, &exam, &admin, 20.0, None, ResultStatus::Absent).await;
    record_result(&db, &alice, &other_exam, &admin, 99.0, Some("A+"), ResultStatus::Pass).await;

    let stats = exam_statistics(&db, &exam).await.unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.passed, 1);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.pass_percentage, 33.33);
    assert_eq!(stats.avg_marks, 65.0);
    assert_eq!(stats.highest_marks, 85.0);
    assert_eq!(stats.lowest_marks, 45.0);
    assert_eq!(stats.grade_distribution.len(), 3);
    assert_eq!(stats.grade_distribution[NO_GRADE], 1);
    assert!(!stats.grade_distribution.contains_key("A+"));
}

#[tokio::test]
async fn an_exam_without_results_has_zeroed_statistics() {
    let db = setup_db().await;
    let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;

    let stats = exam_statistics(&db, &exam).await.unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.pass_percentage, 0.0);
    assert_eq!(stats.avg_marks, 0.0);
}
