use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};

use super::dto::{CreateExamRequest, ExamListResponse, ExamResponse};
use crate::config::EXAM_PAGE_SIZE;
use crate::entities::exam;
use crate::extractor::AuthClaims;
use crate::repositories::ExamRepository;
use crate::routes::{PageQuery, internal_error};
use crate::services::exam_statistics::{ExamStatistics, exam_statistics};
use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/exams", get(get_exams).post(create_exam))
        .route("/api/v1/exams/{exam_id}", get(get_exam))
        .route("/api/v1/exams/{exam_id}/statistics", get(get_exam_statistics))
}

/// Loads an exam or answers 404.
pub(crate) async fn find_exam_or_404(exam_id: i32) -> Result<exam::Model, (StatusCode, String)> {
    let db = get_database_connection()?;
    ExamRepository::new(db)
        .find_by_id(exam_id)
        .await
        .map_err(internal_error("get exam"))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Exam not found".to_string()))
}

/// Create an exam (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/exams",
    request_body = CreateExamRequest,
    responses(
        (status = 201, description = "Exam created", body = ExamResponse),
        (status = 400, description = "Invalid exam data"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
pub async fn create_exam(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateExamRequest>,
) -> Result<(StatusCode, Json<ExamResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let new_exam = payload
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let db = get_database_connection()?;
    let exam = ExamRepository::new(db)
        .create(new_exam)
        .await
        .map_err(internal_error("create exam"))?;

    tracing::info!(exam_id = exam.exam_id, name = %exam.name, "Exam created");

    Ok((StatusCode::CREATED, Json(exam.into())))
}

/// List exams, latest year and semester first (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/exams",
    params(PageQuery),
    responses(
        (status = 200, description = "Exams retrieved", body = ExamListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
pub async fn get_exams(
    auth_claims: AuthClaims,
    Query(query): Query<PageQuery>,
) -> Result<(StatusCode, Json<ExamListResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let db = get_database_connection()?;
    let page = query.page();

    let (exams, total) = ExamRepository::new(db)
        .find_page(page, EXAM_PAGE_SIZE)
        .await
        .map_err(internal_error("list exams"))?;

    let response = ExamListResponse {
        exams: exams.into_iter().map(Into::into).collect(),
        total,
        page,
        page_size: EXAM_PAGE_SIZE,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Get exam by ID (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/exams/{exam_id}",
    params(
        ("exam_id" = i32, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Exam retrieved", body = ExamResponse),
        (status = 404, description = "Exam not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
pub async fn get_exam(
    auth_claims: AuthClaims,
    Path(exam_id): Path<i32>,
) -> Result<(StatusCode, Json<ExamResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let exam = find_exam_or_404(exam_id).await?;
    Ok((StatusCode::OK, Json(exam.into())))
}

/// Pass/fail counts, marks summary and grade distribution of an exam (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/exams/{exam_id}/statistics",
    params(
        ("exam_id" = i32, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Exam statistics", body = ExamStatistics),
        (status = 404, description = "Exam not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn get_exam_statistics(
    auth_claims: AuthClaims,
    Path(exam_id): Path<i32>,
) -> Result<(StatusCode, Json<ExamStatistics>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let exam = find_exam_or_404(exam_id).await?;
    let db = get_database_connection()?;

    let statistics = exam_statistics(db, &exam)
        .await
        .map_err(internal_error("compute exam statistics"))?;

    Ok((StatusCode::OK, Json(statistics)))
}
