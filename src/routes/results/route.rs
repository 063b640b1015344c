use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};

use super::dto::{
    CreateResultRequest, ExamResultListResponse, ExamResultRow, LookupRequest, LookupResponse,
    ResultResponse,
};
use crate::config::RESULT_PAGE_SIZE;
use crate::extractor::AuthClaims;
use crate::repositories::{NewResult, ResultRepository, StudentRepository, is_unique_violation};
use crate::routes::exams::route::find_exam_or_404;
use crate::routes::{PageQuery, internal_error};
use crate::services::result_lookup::{
    LookupOutcome, LookupQuery, NO_RESULTS_MESSAGE, NOT_FOUND_MESSAGE, lookup_results,
};
use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/results", post(create_result))
        .route("/api/v1/results/lookup", post(lookup))
        .route("/api/v1/exams/{exam_id}/results", get(get_exam_results))
}

/// Record one result by hand (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/results",
    request_body = CreateResultRequest,
    responses(
        (status = 201, description = "Result recorded", body = ResultResponse),
        (status = 400, description = "Invalid result data"),
        (status = 404, description = "Student or exam not found"),
        (status = 409, description = "Result already exists for this student and exam"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
pub async fn create_result(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateResultRequest>,
) -> Result<(StatusCode, Json<ResultResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let entry = payload
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let exam = find_exam_or_404(payload.exam_id).await?;
    let db = get_database_connection()?;

    let student = StudentRepository::new(db)
        .find_by_roll_number(&entry.roll_number)
        .await
        .map_err(internal_error("look up student"))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Student with roll number {} not found", entry.roll_number),
            )
        })?;

    let result_repo = ResultRepository::new(db);
    let duplicate_message = || {
        (
            StatusCode::CONFLICT,
            format!("Result already exists for {}", entry.roll_number),
        )
    };

    let existing = result_repo
        .find_by_student_and_exam(student.student_id, exam.exam_id)
        .await
        .map_err(internal_error("check existing result"))?;
    if existing.is_some() {
        return Err(duplicate_message());
    }

    let result = result_repo
        .create(NewResult {
            student_id: student.student_id,
            exam_id: exam.exam_id,
            marks_obtained: entry.marks_obtained,
            grade: entry.grade.clone(),
            status: entry.status,
            remarks: entry.remarks.clone(),
            uploaded_by: auth_claims.0.user_id,
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_message()
            } else {
                internal_error("record result")(e)
            }
        })?;

    tracing::info!(
        exam_id = exam.exam_id,
        roll_number = %student.roll_number,
        "Result recorded manually"
    );

    Ok((
        StatusCode::CREATED,
        Json(ResultResponse::from_models(result, &exam)),
    ))
}

/// Results of an exam ordered by roll number (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/exams/{exam_id}/results",
    params(
        ("exam_id" = i32, Path, description = "Exam ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Exam results retrieved", body = ExamResultListResponse),
        (status = 404, description = "Exam not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
pub async fn get_exam_results(
    auth_claims: AuthClaims,
    Path(exam_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<(StatusCode, Json<ExamResultListResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let exam = find_exam_or_404(exam_id).await?;
    let db = get_database_connection()?;
    let page = query.page();

    let (rows, total) = ResultRepository::new(db)
        .find_page_with_students_by_exam(exam.exam_id, page, RESULT_PAGE_SIZE)
        .await
        .map_err(internal_error("list exam results"))?;

    let response = ExamResultListResponse {
        exam_id: exam.exam_id,
        exam_name: exam.name.clone(),
        results: rows
            .into_iter()
            .map(|(result, student)| ExamResultRow::from_models(result, student, &exam))
            .collect(),
        total,
        page,
        page_size: RESULT_PAGE_SIZE,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Student result lookup by roll number and ID card or phone number
#[utoipa::path(
    post,
    path = "/api/v1/results/lookup",
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Lookup finished; `found` tells whether the credentials matched", body = LookupResponse),
        (status = 400, description = "Missing or malformed credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Results"
)]
pub async fn lookup(
    Json(payload): Json<LookupRequest>,
) -> Result<(StatusCode, Json<LookupResponse>), (StatusCode, String)> {
    let query = LookupQuery::parse(
        &payload.roll_number,
        payload.id_card_number.as_deref(),
        payload.phone_number.as_deref(),
    )
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let db = get_database_connection()?;
    let outcome = lookup_results(db, &query)
        .await
        .map_err(internal_error("look up results"))?;

    let response = match outcome {
        LookupOutcome::NotFound => {
            tracing::info!("Result lookup did not match any student");
            LookupResponse {
                found: false,
                message: Some(NOT_FOUND_MESSAGE.to_string()),
                student: None,
                results: Vec::new(),
            }
        }
        LookupOutcome::NoResults(student) => LookupResponse {
            found: true,
            message: Some(NO_RESULTS_MESSAGE.to_string()),
            student: Some(student.into()),
            results: Vec::new(),
        },
        LookupOutcome::Found { student, results } => LookupResponse {
            found: true,
            message: None,
            student: Some(student.into()),
            results,
        },
    };

    Ok((StatusCode::OK, Json(response)))
}
