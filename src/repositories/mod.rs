pub mod exam_repository;
pub mod result_repository;
pub mod result_upload_repository;
pub mod student_repository;
pub mod user_repository;

pub use exam_repository::{ExamRepository, NewExam};
pub use result_repository::{NewResult, ResultRepository};
pub use result_upload_repository::ResultUploadRepository;
pub use student_repository::{NewStudent, StudentRepository};
pub use user_repository::UserRepository;

use sea_orm::{DbErr, SqlErr};

/// True when the error chain carries a unique-constraint violation from the database.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<DbErr>())
        .any(|db_err| matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))))
}
