use axum::{
    Json, Router,
    extract::{Multipart, Path},
    http::StatusCode,
    routing::{get, post},
};

use super::dto::{ResultUploadResponse, UploadHistoryResponse};
use crate::entities::sea_orm_active_enums::UploadStatus;
use crate::extractor::AuthClaims;
use crate::repositories::ResultUploadRepository;
use crate::routes::exams::route::find_exam_or_404;
use crate::routes::internal_error;
use crate::services::result_import::ResultImporter;
use crate::static_service::get_database_connection;
use crate::utils::upload::read_result_file;

/// Upload history shown by `GET /api/v1/uploads`.
const UPLOAD_HISTORY_LIMIT: u64 = 50;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/exams/{exam_id}/results/upload",
            post(upload_results),
        )
        .route("/api/v1/uploads", get(get_uploads))
}

/// Import results of an exam from a CSV or Excel file (Admin only)
///
/// Expected columns: `roll_number`, `marks_obtained`, and optionally `grade`,
/// `status` (Pass, Fail or Absent; default Pass) and `remarks`.
///
/// The batch ends as `Completed` or `Completed with errors` depending on row
/// failures. A file that cannot be decoded, or a database failure mid-import,
/// marks it `Failed` instead; nothing from that file is stored.
#[utoipa::path(
    post,
    path = "/api/v1/exams/{exam_id}/results/upload",
    params(
        ("exam_id" = i32, Path, description = "Exam ID")
    ),
    request_body(content = String, content_type = "multipart/form-data", description = "Multipart form data with field: file (binary, .csv or .xlsx/.xls)"),
    responses(
        (status = 200, description = "File processed; row failures are listed in `errors`", body = ResultUploadResponse),
        (status = 400, description = "Missing file or unsupported file type"),
        (status = 404, description = "Exam not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn upload_results(
    auth_claims: AuthClaims,
    Path(exam_id): Path<i32>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ResultUploadResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let exam = find_exam_or_404(exam_id).await?;
    let file = read_result_file(multipart).await?;
    let uploaded_by = auth_claims.0.user_id;

    let db = get_database_connection()?;
    let upload_repo = ResultUploadRepository::new(db);

    let upload = upload_repo
        .create_processing(&file.file_name, exam.exam_id, uploaded_by)
        .await
        .map_err(internal_error("record upload"))?;

    tracing::info!(
        upload_id = upload.result_upload_id,
        exam_id = exam.exam_id,
        file_name = %file.file_name,
        size = file.data.len(),
        "Processing result upload"
    );

    match ResultImporter::new(db)
        .import(exam.exam_id, uploaded_by, &file)
        .await
    {
        Ok(report) => {
            let upload = upload_repo
                .complete(
                    upload,
                    report.success_count,
                    report.failure_count,
                    report.upload_status(),
                    report.error_log(),
                )
                .await
                .map_err(internal_error("finalize upload"))?;

            Ok((
                StatusCode::OK,
                Json(ResultUploadResponse::from_model(upload, report.errors)),
            ))
        }
        Err(e) => {
            tracing::error!(
                upload_id = upload.result_upload_id,
                "Result import failed: {:#}",
                e
            );
            let message = "File processing error: the results could not be saved".to_string();
            if let Err(finalize_err) = upload_repo
                .complete(upload, 0, 0, UploadStatus::Failed, Some(message.clone()))
                .await
            {
                tracing::error!("Failed to mark upload as failed: {:#}", finalize_err);
            }
            Err((StatusCode::INTERNAL_SERVER_ERROR, message))
        }
    }
}

/// Most recent result uploads (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/uploads",
    responses(
        (status = 200, description = "Upload history", body = UploadHistoryResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn get_uploads(
    auth_claims: AuthClaims,
) -> Result<(StatusCode, Json<UploadHistoryResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let db = get_database_connection()?;
    let uploads = ResultUploadRepository::new(db)
        .find_recent(UPLOAD_HISTORY_LIMIT)
        .await
        .map_err(internal_error("list uploads"))?;

    Ok((
        StatusCode::OK,
        Json(UploadHistoryResponse {
            uploads: uploads.into_iter().map(Into::into).collect(),
        }),
    ))
}
