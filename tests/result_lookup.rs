mod common;

use result_portal::entities::sea_orm_active_enums::ResultStatus;
use result_portal::services::result_lookup::{LookupOutcome, LookupQuery, lookup_results};

use common::{create_admin, create_exam, create_student, record_result, setup_db};

fn query(roll: &str, id_card: Option<&str>, phone: Option<&str>) -> LookupQuery {
    LookupQuery::parse(roll, id_card, phone).unwrap()
}

#[tokio::test]
async fn matching_id_card_returns_results_in_exam_order() {
    let db = setup_db().await;
    let admin = create_admin(&db).await;
    let student = create_student(&db, "2023001", "ID001", "+1234567890").await;

    let later = create_exam(&db, "Pathology Mid-term", 2, 3, 100.0, 50.0).await;
    let physiology = create_exam(&db, "Physiology Final", 1, 1, 100.0, 50.0).await;
    let anatomy = create_exam(&db, "Anatomy Mid-term", 1, 1, 100.0, 50.0).await;

    record_result(&db, &student, &later, &admin, 88.0, Some("A"), ResultStatus::Pass).await;
    record_result(&db, &student, &physiology, &admin, 45.0, Some("C"), ResultStatus::Fail).await;
    record_result(&db, &student, &anatomy, &admin, 85.0, Some("A"), ResultStatus::Pass).await;

    let outcome = lookup_results(&db, &query("2023001", Some("ID001"), None))
        .await
        .unwrap();

    let (found, results) = match outcome {
        LookupOutcome::Found { student, results } => (student, results),
        other => panic!("expected results, got {:?}", other),
    };
    assert_eq!(found.student_id, student.student_id);

    let names: Vec<&str> = results.iter().map(|r| r.exam_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Anatomy Mid-term", "Physiology Final", "Pathology Mid-term"]
    );
    assert!(results[0].is_pass);
    assert!(!results[1].is_pass);
    assert_eq!(results[2].percentage, 88.0);
}

#[tokio::test]
async fn phone_number_works_as_the_secondary_credential() {
    let db = setup_db().await;
    let admin = create_admin(&db).await;
    let student = create_student(&db, "2023001", "ID001", "+1234567890").await;
    let exam = create_exam(&db, "Anatomy Mid-term", 1, 1, 100.0, 50.0).await;
    record_result(&db, &student, &exam, &admin, 70.0, None, ResultStatus::Pass).await;

    let outcome = lookup_results(&db, &query("2023001", None, Some("+1234567890")))
        .await
        .unwrap();

    assert!(matches!(outcome, LookupOutcome::Found { ref results, .. } if results.len() == 1));
}

#[tokio::test]
async fn wrong_id_card_and_unknown_roll_number_look_the_same() {
    let db = setup_db().await;
    create_student(&db, "2023001", "ID001", "+1234567890").await;

    let wrong_card = lookup_results(&db, &query("2023001", Some("ID999"), None))
        .await
        .unwrap();
    let unknown_roll = lookup_results(&db, &query("2099999", Some("ID001"), None))
        .await
        .unwrap();

    assert_eq!(wrong_card, LookupOutcome::NotFound);
    assert_eq!(unknown_roll, LookupOutcome::NotFound);
}

#[tokio::test]
async fn id_card_is_checked_even_when_a_matching_phone_is_also_given() {
    let db = setup_db().await;
    create_student(&db, "2023001", "ID001", "+1234567890").await;

    let outcome = lookup_results(&db, &query("2023001", Some("ID999"), Some("+1234567890")))
        .await
        .unwrap();

    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[tokio::test]
async fn valid_credentials_without_results_are_reported_as_such() {
    let db = setup_db().await;
    let student = create_student(&db, "2023002", "ID002", "+1234567891").await;

    let outcome = lookup_results(&db, &query("2023002", Some("ID002"), None))
        .await
        .unwrap();

    match outcome {
        LookupOutcome::NoResults(found) => assert_eq!(found.student_id, student.student_id),
        other => panic!("expected a student without results, got {:?}", other),
    }
}
