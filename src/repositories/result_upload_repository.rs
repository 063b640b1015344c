use crate::entities::result_upload;
use crate::entities::sea_orm_active_enums::UploadStatus;
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, QuerySelect, Set};

pub struct ResultUploadRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResultUploadRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Opens the audit record of an upload in `Processing` state.
    pub async fn create_processing(
        &self,
        file_name: &str,
        exam_id: i32,
        uploaded_by: i32,
    ) -> Result<result_upload::Model> {
        let upload_model = result_upload::ActiveModel {
            file_name: Set(file_name.to_string()),
            exam_id: Set(exam_id),
            uploaded_by: Set(uploaded_by),
            total_records: Set(0),
            successful_records: Set(0),
            failed_records: Set(0),
            status: Set(UploadStatus::Processing),
            error_log: Set(None),
            uploaded_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = upload_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn complete(
        &self,
        upload: result_upload::Model,
        successful_records: usize,
        failed_records: usize,
        status: UploadStatus,
        error_log: Option<String>,
    ) -> Result<result_upload::Model> {
        let mut active_model: result_upload::ActiveModel = upload.into();
        active_model.total_records = Set(i32::try_from(successful_records + failed_records)?);
        active_model.successful_records = Set(i32::try_from(successful_records)?);
        active_model.failed_records = Set(i32::try_from(failed_records)?);
        active_model.status = Set(status);
        active_model.error_log = Set(error_log);

        let result = active_model.update(self.db).await?;
        Ok(result)
    }

    pub async fn find_recent(&self, limit: u64) -> Result<Vec<result_upload::Model>> {
        let uploads = result_upload::Entity::find()
            .order_by_desc(result_upload::Column::UploadedAt)
            .order_by_desc(result_upload::Column::ResultUploadId)
            .limit(limit)
            .all(self.db)
            .await?;
        Ok(uploads)
    }
}
