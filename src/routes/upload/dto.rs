use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::result_upload;
use crate::entities::sea_orm_active_enums::UploadStatus;

#[derive(Debug, Serialize, ToSchema)]
pub struct ResultUploadResponse {
    #[schema(example = 12)]
    pub upload_id: i32,
    #[schema(example = "final_results.xlsx")]
    pub file_name: String,
    #[schema(example = 40)]
    pub total_records: i32,
    #[schema(example = 38)]
    pub successful_records: i32,
    #[schema(example = 2)]
    pub failed_records: i32,
    pub status: UploadStatus,
    /// One "Row N: reason" line per rejected row
    pub errors: Vec<String>,
}

impl ResultUploadResponse {
    pub fn from_model(upload: result_upload::Model, errors: Vec<String>) -> Self {
        Self {
            upload_id: upload.result_upload_id,
            file_name: upload.file_name,
            total_records: upload.total_records,
            successful_records: upload.successful_records,
            failed_records: upload.failed_records,
            status: upload.status,
            errors,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadHistoryItem {
    pub upload_id: i32,
    pub file_name: String,
    pub exam_id: i32,
    pub uploaded_by: i32,
    pub total_records: i32,
    pub successful_records: i32,
    pub failed_records: i32,
    pub status: UploadStatus,
    pub error_log: Option<String>,
    pub uploaded_at: NaiveDateTime,
}

impl From<result_upload::Model> for UploadHistoryItem {
    fn from(u: result_upload::Model) -> Self {
        Self {
            upload_id: u.result_upload_id,
            file_name: u.file_name,
            exam_id: u.exam_id,
            uploaded_by: u.uploaded_by,
            total_records: u.total_records,
            successful_records: u.successful_records,
            failed_records: u.failed_records,
            status: u.status,
            error_log: u.error_log,
            uploaded_at: u.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadHistoryResponse {
    pub uploads: Vec<UploadHistoryItem>,
}
