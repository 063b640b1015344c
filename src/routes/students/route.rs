use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};

use super::dto::{CreateStudentRequest, StudentListResponse, StudentResponse};
use crate::config::STUDENT_PAGE_SIZE;
use crate::extractor::AuthClaims;
use crate::repositories::{StudentRepository, is_unique_violation};
use crate::routes::{PageQuery, internal_error};
use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/students",
            get(get_students).post(create_student),
        )
        .route("/api/v1/students/{student_id}", get(get_student))
}

/// Register a student (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Invalid student data"),
        (status = 409, description = "Roll number already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn create_student(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let new_student = payload
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let db = get_database_connection()?;
    let student_repo = StudentRepository::new(db);

    let roll_taken = student_repo
        .find_by_roll_number(&new_student.roll_number)
        .await
        .map_err(internal_error("check roll number"))?
        .is_some();
    if roll_taken {
        return Err((
            StatusCode::CONFLICT,
            "Roll number already exists".to_string(),
        ));
    }

    let student = student_repo.create(new_student).await.map_err(|e| {
        if is_unique_violation(&e) {
            (
                StatusCode::CONFLICT,
                "Roll number already exists".to_string(),
            )
        } else {
            internal_error("create student")(e)
        }
    })?;

    tracing::info!(roll_number = %student.roll_number, "Student created");

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// List students ordered by roll number (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/students",
    params(PageQuery),
    responses(
        (status = 200, description = "Students retrieved", body = StudentListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_students(
    auth_claims: AuthClaims,
    Query(query): Query<PageQuery>,
) -> Result<(StatusCode, Json<StudentListResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let db = get_database_connection()?;
    let page = query.page();

    let (students, total) = StudentRepository::new(db)
        .find_page(page, STUDENT_PAGE_SIZE)
        .await
        .map_err(internal_error("list students"))?;

    let response = StudentListResponse {
        students: students.into_iter().map(Into::into).collect(),
        total,
        page,
        page_size: STUDENT_PAGE_SIZE,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Get student by ID (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student retrieved", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student(
    auth_claims: AuthClaims,
    Path(student_id): Path<i32>,
) -> Result<(StatusCode, Json<StudentResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let db = get_database_connection()?;
    let student = StudentRepository::new(db)
        .find_by_id(student_id)
        .await
        .map_err(internal_error("get student"))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Student not found".to_string()))?;

    Ok((StatusCode::OK, Json(student.into())))
}
