use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::upload::dto::UploadHistoryItem;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub total_students: u64,
    pub total_exams: u64,
    pub total_results: u64,
    pub recent_uploads: Vec<UploadHistoryItem>,
}
