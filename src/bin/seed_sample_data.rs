use anyhow::Context;
use chrono::NaiveDate;
use result_portal::bootstrap::initialize_admin_user;
use result_portal::config::APP_CONFIG;
use result_portal::entities::exam;
use result_portal::entities::sea_orm_active_enums::{ExamType, ResultStatus};
use result_portal::repositories::{
    ExamRepository, NewExam, NewResult, NewStudent, ResultRepository, StudentRepository,
    UserRepository,
};
use result_portal::static_service::init_database_connection;
use result_portal::utils::tracing::init_standard_tracing;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

struct SampleStudent {
    roll_number: &'static str,
    id_card_number: &'static str,
    phone_number: &'static str,
    name: &'static str,
    email: &'static str,
    year: i32,
    section: &'static str,
}

const SAMPLE_STUDENTS: [SampleStudent; 5] = [
    SampleStudent {
        roll_number: "2023001",
        id_card_number: "ID001",
        phone_number: "+1234567890",
        name: "Alice Johnson",
        email: "alice@student.edu",
        year: 1,
        section: "A",
    },
    SampleStudent {
        roll_number: "2023002",
        id_card_number: "ID002",
        phone_number: "+1234567891",
        name: "Bob Smith",
        email: "bob@student.edu",
        year: 1,
        section: "A",
    },
    SampleStudent {
        roll_number: "2023003",
        id_card_number: "ID003",
        phone_number: "+1234567892",
        name: "Carol Davis",
        email: "carol@student.edu",
        year: 1,
        section: "B",
    },
    SampleStudent {
        roll_number: "2022001",
        id_card_number: "ID004",
        phone_number: "+1234567893",
        name: "David Wilson",
        email: "david@student.edu",
        year: 2,
        section: "A",
    },
    SampleStudent {
        roll_number: "2022002",
        id_card_number: "ID005",
        phone_number: "+1234567894",
        name: "Eva Brown",
        email: "eva@student.edu",
        year: 2,
        section: "A",
    },
];

/// (name, type, year, semester, subject, total, passing, (y, m, d))
type SampleExam = (&'static str, ExamType, i32, i32, &'static str, f64, f64, (i32, u32, u32));

const SAMPLE_EXAMS: [SampleExam; 4] = [
    ("Mid-term Examination", ExamType::MidTerm, 1, 1, "Anatomy", 100.0, 50.0, (2023, 10, 15)),
    ("Final Examination", ExamType::Final, 1, 1, "Physiology", 100.0, 50.0, (2023, 12, 20)),
    ("Practical Assessment", ExamType::Practical, 1, 1, "Biochemistry", 50.0, 25.0, (2023, 11, 10)),
    ("Mid-term Examination", ExamType::MidTerm, 2, 3, "Pathology", 100.0, 50.0, (2023, 10, 25)),
];

/// (roll number, subject, marks, grade, status)
const SAMPLE_RESULTS: [(&str, &str, f64, &str, ResultStatus); 11] = [
    ("2023001", "Anatomy", 85.0, "A", ResultStatus::Pass),
    ("2023002", "Anatomy", 72.0, "B+", ResultStatus::Pass),
    ("2023003", "Anatomy", 45.0, "C", ResultStatus::Fail),
    ("2023001", "Physiology", 78.0, "B+", ResultStatus::Pass),
    ("2023002", "Physiology", 68.0, "B", ResultStatus::Pass),
    ("2023003", "Physiology", 55.0, "C+", ResultStatus::Pass),
    ("2023001", "Biochemistry", 42.0, "A", ResultStatus::Pass),
    ("2023002", "Biochemistry", 38.0, "B+", ResultStatus::Pass),
    ("2023003", "Biochemistry", 20.0, "F", ResultStatus::Fail),
    ("2022001", "Pathology", 88.0, "A", ResultStatus::Pass),
    ("2022002", "Pathology", 75.0, "B+", ResultStatus::Pass),
];

async fn seed_students(db: &DatabaseConnection) -> anyhow::Result<usize> {
    let student_repo = StudentRepository::new(db);
    let mut created = 0;

    for sample in &SAMPLE_STUDENTS {
        if student_repo
            .find_by_roll_number(sample.roll_number)
            .await?
            .is_some()
        {
            continue;
        }

        student_repo
            .create(NewStudent {
                roll_number: sample.roll_number.to_string(),
                id_card_number: sample.id_card_number.to_string(),
                phone_number: sample.phone_number.to_string(),
                name: sample.name.to_string(),
                email: Some(sample.email.to_string()),
                year: sample.year,
                section: Some(sample.section.to_string()),
            })
            .await
            .with_context(|| format!("Failed to create student {}", sample.roll_number))?;
        created += 1;
    }

    Ok(created)
}

async fn seed_exams(db: &DatabaseConnection) -> anyhow::Result<Vec<exam::Model>> {
    let exam_repo = ExamRepository::new(db);
    let mut exams = Vec::with_capacity(SAMPLE_EXAMS.len());

    for (name, exam_type, year, semester, subject, total, passing, (y, m, d)) in SAMPLE_EXAMS {
        let existing = exam::Entity::find()
            .filter(exam::Column::Name.eq(name))
            .filter(exam::Column::Subject.eq(subject))
            .filter(exam::Column::Year.eq(year))
            .filter(exam::Column::Semester.eq(semester))
            .one(db)
            .await?;

        let exam = match existing {
            Some(exam) => exam,
            None => {
                exam_repo
                    .create(NewExam {
                        name: name.to_string(),
                        exam_type,
                        year,
                        semester,
                        subject: subject.to_string(),
                        total_marks: total,
                        passing_marks: passing,
                        exam_date: NaiveDate::from_ymd_opt(y, m, d),
                    })
                    .await
                    .with_context(|| format!("Failed to create exam {} ({})", name, subject))?
            }
        };
        exams.push(exam);
    }

    Ok(exams)
}

async fn seed_results(
    db: &DatabaseConnection,
    exams: &[exam::Model],
    uploaded_by: i32,
) -> anyhow::Result<usize> {
    let student_repo = StudentRepository::new(db);
    let result_repo = ResultRepository::new(db);
    let mut created = 0;

    for (roll_number, subject, marks, grade, status) in SAMPLE_RESULTS {
        let Some(student) = student_repo.find_by_roll_number(roll_number).await? else {
            continue;
        };
        let Some(exam) = exams.iter().find(|e| e.subject == subject) else {
            continue;
        };

        if result_repo
            .find_by_student_and_exam(student.student_id, exam.exam_id)
            .await?
            .is_some()
        {
            continue;
        }

        result_repo
            .create(NewResult {
                student_id: student.student_id,
                exam_id: exam.exam_id,
                marks_obtained: marks,
                grade: Some(grade.to_string()),
                status,
                remarks: None,
                uploaded_by,
            })
            .await?;
        created += 1;
    }

    Ok(created)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    let db = init_database_connection().await?;

    initialize_admin_user(db).await?;
    let admin = UserRepository::new(db)
        .find_by_username(&APP_CONFIG.admin_username)
        .await?
        .context("Admin user is missing after initialization")?;

    let students = seed_students(db).await?;
    let exams = seed_exams(db).await?;
    let results = seed_results(db, &exams, admin.user_id).await?;

    tracing::info!(students, exams = exams.len(), results, "Sample data initialized");
    tracing::info!(
        "Try a lookup with roll_number 2023001 and id_card_number ID001 or phone_number +1234567890"
    );

    Ok(())
}
