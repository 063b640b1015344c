use axum::{Json, Router, http::StatusCode, routing::get};

use super::dto::DashboardResponse;
use crate::config::RECENT_UPLOAD_LIMIT;
use crate::extractor::AuthClaims;
use crate::repositories::{
    ExamRepository, ResultRepository, ResultUploadRepository, StudentRepository,
};
use crate::routes::internal_error;
use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new().route("/api/v1/dashboard", get(get_dashboard))
}

/// Record counts and the latest uploads (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn get_dashboard(
    auth_claims: AuthClaims,
) -> Result<(StatusCode, Json<DashboardResponse>), (StatusCode, String)> {
    auth_claims.require_admin()?;

    let db = get_database_connection()?;

    let total_students = StudentRepository::new(db)
        .count()
        .await
        .map_err(internal_error("count students"))?;
    let total_exams = ExamRepository::new(db)
        .count()
        .await
        .map_err(internal_error("count exams"))?;
    let total_results = ResultRepository::new(db)
        .count()
        .await
        .map_err(internal_error("count results"))?;
    let recent_uploads = ResultUploadRepository::new(db)
        .find_recent(RECENT_UPLOAD_LIMIT)
        .await
        .map_err(internal_error("list recent uploads"))?;

    Ok((
        StatusCode::OK,
        Json(DashboardResponse {
            total_students,
            total_exams,
            total_results,
            recent_uploads: recent_uploads.into_iter().map(Into::into).collect(),
        }),
    ))
}
