mod common;

use result_portal::entities::sea_orm_active_enums::{ResultStatus, UploadStatus};
use result_portal::repositories::{ResultRepository, ResultUploadRepository};
use result_portal::services::result_import::ResultImporter;
use result_portal::utils::upload::UploadedFile;

use common::{create_admin, create_exam, create_student, record_result, setup_db};

const RESULTS_CSV: &str = "\
roll_number,marks_obtained,grade,status,remarks
2023001,85,A,Pass,Excellent
2023002,45,,fail,
2023003,0,,Absent,Medical leave
";

fn csv_file(content: &str) -> UploadedFile {
    UploadedFile::new("results.csv", content.as_bytes().to_vec())
}

mod valid_rows {
    use super::*;

    #[tokio::test]
    async fn rows_for_known_students_are_stored() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        for roll in ["2023001", "2023002", "2023003"] {
            create_student(&db, roll, &format!("ID{}", roll), "9876543210").await;
        }

        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &csv_file(RESULTS_CSV))
            .await
            .unwrap();

        assert_eq!(report.success_count, 3);
        assert_eq!(report.failure_count, 0);
        assert!(report.errors.is_empty());
        assert_eq!(report.upload_status(), UploadStatus::Completed);

        let mut stored = ResultRepository::new(&db)
            .find_by_exam(exam.exam_id)
            .await
            .unwrap();
        stored.sort_by_key(|r| r.student_id);

        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].marks_obtained, 85.0);
        assert_eq!(stored[0].grade.as_deref(), Some("A"));
        assert_eq!(stored[0].status, ResultStatus::Pass);
        assert_eq!(stored[0].remarks.as_deref(), Some("Excellent"));
        assert_eq!(stored[0].uploaded_by, admin.user_id);
        assert_eq!(stored[1].grade, None);
        assert_eq!(stored[1].status, ResultStatus::Fail);
        assert_eq!(stored[1].remarks, None);
        assert_eq!(stored[2].status, ResultStatus::Absent);
    }
}

mod row_failures {
    use super::*;

    #[tokio::test]
    async fn unknown_students_are_reported_with_their_row_number() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        create_student(&db, "2023001", "ID001", "9876543210").await;

        let csv = "roll_number,marks_obtained\n2023001,70\n9999999,50\n";
        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &csv_file(csv))
            .await
            .unwrap();

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 1);
        assert_eq!(
            report.errors,
            vec!["Row 2: Student with roll number 9999999 not found".to_string()]
        );
        assert_eq!(report.upload_status(), UploadStatus::CompletedWithErrors);
    }

    #[tokio::test]
    async fn invalid_rows_do_not_stop_the_batch() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        create_student(&db, "2023001", "ID001", "9876543210").await;
        create_student(&db, "2023002", "ID002", "9876543211").await;

        let csv = "roll_number,marks_obtained,status\n2023001,abc,Pass\n,40,Pass\n2023002,66,Pass\n";
        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &csv_file(csv))
            .await
            .unwrap();

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 2);
        assert!(report.errors[0].starts_with("Row 1: "));
        assert!(report.errors[1].starts_with("Row 2: "));
        assert_eq!(ResultRepository::new(&db).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn existing_results_are_not_overwritten() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        let student = create_student(&db, "2023001", "ID001", "9876543210").await;
        record_result(&db, &student, &exam, &admin, 30.0, None, ResultStatus::Fail).await;

        let csv = "roll_number,marks_obtained\n2023001,95\n";
        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &csv_file(csv))
            .await
            .unwrap();

        assert_eq!(report.success_count, 0);
        assert_eq!(
            report.errors,
            vec!["Row 1: Result already exists for 2023001".to_string()]
        );

        let stored = ResultRepository::new(&db)
            .find_by_student_and_exam(student.student_id, exam.exam_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.marks_obtained, 30.0);
    }

    #[tokio::test]
    async fn a_student_repeated_in_one_file_is_imported_once() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        create_student(&db, "2023001", "ID001", "9876543210").await;

        let csv = "roll_number,marks_obtained\n2023001,60\n2023001,61\n";
        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &csv_file(csv))
            .await
            .unwrap();

        assert_eq!(report.success_count, 1);
        assert_eq!(
            report.errors,
            vec!["Row 2: Result already exists for 2023001".to_string()]
        );
        assert_eq!(ResultRepository::new(&db).count().await.unwrap(), 1);
    }
}

mod reimport {
    use super::*;

    #[tokio::test]
    async fn importing_the_same_file_twice_only_reports_duplicates() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        for roll in ["2023001", "2023002", "2023003"] {
            create_student(&db, roll, &format!("ID{}", roll), "9876543210").await;
        }
        let importer = ResultImporter::new(&db);
        let file = csv_file(RESULTS_CSV);

        let first = importer.import(exam.exam_id, admin.user_id, &file).await.unwrap();
        let second = importer.import(exam.exam_id, admin.user_id, &file).await.unwrap();

        assert_eq!(first.success_count, 3);
        assert_eq!(second.success_count, 0);
        assert_eq!(second.failure_count, 3);
        assert!(
            second
                .errors
                .iter()
                .all(|e| e.contains("Result already exists for"))
        );
        assert_eq!(ResultRepository::new(&db).count().await.unwrap(), 3);
    }
}

mod spreadsheets {
    use super::*;

    const RESULTS_XLSX: &[u8] = include_bytes!("fixtures/results.xlsx");

    #[tokio::test]
    async fn workbook_rows_are_imported_and_errors_use_sheet_positions() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        let first = create_student(&db, "2023001", "ID2023001", "9876543210").await;
        let second = create_student(&db, "2023002", "ID2023002", "9876543211").await;

        let file = UploadedFile::new("results.xlsx", RESULTS_XLSX.to_vec());
        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &file)
            .await
            .unwrap();

        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 1);
        assert_eq!(
            report.errors,
            vec!["Row 4: Student with roll number 9999999 not found".to_string()]
        );

        let repo = ResultRepository::new(&db);
        let stored = repo
            .find_by_student_and_exam(first.student_id, exam.exam_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.marks_obtained, 85.0);
        assert_eq!(stored.grade.as_deref(), Some("A"));
        assert_eq!(stored.status, ResultStatus::Pass);
        assert_eq!(stored.remarks.as_deref(), Some("Excellent"));

        let stored = repo
            .find_by_student_and_exam(second.student_id, exam.exam_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.marks_obtained, 45.0);
        assert_eq!(stored.grade, None);
        assert_eq!(stored.status, ResultStatus::Fail);
    }
}

mod file_failures {
    use super::*;

    #[tokio::test]
    async fn a_file_without_required_columns_touches_nothing() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        create_student(&db, "2023001", "ID001", "9876543210").await;

        let csv = "roll,score\n2023001,70\n";
        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &csv_file(csv))
            .await
            .unwrap();

        assert_eq!(report.success_count, 0);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("File processing error: "));
        assert_eq!(report.upload_status(), UploadStatus::Failed);
        assert_eq!(ResultRepository::new(&db).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn an_unreadable_spreadsheet_is_a_file_error() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;

        let file = UploadedFile::new("results.xlsx", b"not a workbook".to_vec());
        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &file)
            .await
            .unwrap();

        assert_eq!(report.upload_status(), UploadStatus::Failed);
        assert!(report.errors[0].starts_with("File processing error: "));
    }
}

mod upload_batches {
    use super::*;

    #[tokio::test]
    async fn a_batch_is_opened_as_processing_and_finalized_with_counts() {
        let db = setup_db().await;
        let admin = create_admin(&db).await;
        let exam = create_exam(&db, "Anatomy Final", 1, 1, 100.0, 50.0).await;
        create_student(&db, "2023001", "ID001", "9876543210").await;
        let upload_repo = ResultUploadRepository::new(&db);

        let upload = upload_repo
            .create_processing("results.csv", exam.exam_id, admin.user_id)
            .await
            .unwrap();
        assert_eq!(upload.status, UploadStatus::Processing);

        let csv = "roll_number,marks_obtained\n2023001,70\n2023999,50\n";
        let report = ResultImporter::new(&db)
            .import(exam.exam_id, admin.user_id, &csv_file(csv))
            .await
            .unwrap();

        let upload = upload_repo
            .complete(
                upload,
                report.success_count,
                report.failure_count,
                report.upload_status(),
                report.error_log(),
            )
            .await
            .unwrap();

        assert_eq!(upload.total_records, 2);
        assert_eq!(upload.successful_records, 1);
        assert_eq!(upload.failed_records, 1);
        assert_eq!(upload.status, UploadStatus::CompletedWithErrors);
        assert_eq!(
            upload.error_log.as_deref(),
            Some("Row 2: Student with roll number 2023999 not found")
        );

        let recent = upload_repo.find_recent(5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].result_upload_id, upload.result_upload_id);
    }
}
