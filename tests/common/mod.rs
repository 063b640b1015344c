#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use result_portal::entities::sea_orm_active_enums::{ExamType, ResultStatus};
use result_portal::entities::{exam, student, user};
use result_portal::repositories::{
    ExamRepository, NewExam, NewResult, NewStudent, ResultRepository, StudentRepository,
    UserRepository,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with every migration applied.
///
/// A single pooled connection keeps all queries on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory SQLite database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn create_admin(db: &DatabaseConnection) -> user::Model {
    UserRepository::new(db)
        .create(
            "admin".to_string(),
            "admin@university.edu".to_string(),
            "$2b$04$not-a-real-hash".to_string(),
            true,
        )
        .await
        .expect("Failed to create admin")
}

pub async fn create_student(
    db: &DatabaseConnection,
    roll_number: &str,
    id_card_number: &str,
    phone_number: &str,
) -> student::Model {
    StudentRepository::new(db)
        .create(NewStudent {
            roll_number: roll_number.to_string(),
            id_card_number: id_card_number.to_string(),
            phone_number: phone_number.to_string(),
            name: format!("Student {}", roll_number),
            email: None,
            year: 1,
            section: Some("A".to_string()),
        })
        .await
        .expect("Failed to create student")
}

pub async fn create_exam(
    db: &DatabaseConnection,
    name: &str,
    year: i32,
    semester: i32,
    total_marks: f64,
    passing_marks: f64,
) -> exam::Model {
    ExamRepository::new(db)
        .create(NewExam {
            name: name.to_string(),
            exam_type: ExamType::Final,
            year,
            semester,
            subject: format!("{} subject", name),
            total_marks,
            passing_marks,
            exam_date: None,
        })
        .await
        .expect("Failed to create exam")
}

pub async fn record_result(
    db: &DatabaseConnection,
    student: &student::Model,
    exam: &exam::Model,
    uploaded_by: &user::Model,
    marks_obtained: f64,
    grade: Option<&str>,
    status: ResultStatus,
) {
    ResultRepository::new(db)
        .create(NewResult {
            student_id: student.student_id,
            exam_id: exam.exam_id,
            marks_obtained,
            grade: grade.map(str::to_string),
            status,
            remarks: None,
            uploaded_by: uploaded_by.user_id,
        })
        .await
        .expect("Failed to record result");
}
