use axum::extract::Multipart;
use bytes::Bytes;
use http::StatusCode;

/// Result files accepted by the import endpoint.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["csv", "xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A file received through a multipart upload, kept in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Lower-cased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

pub fn sanitize_upload_name(file_name: &str) -> String {
    let sanitized = sanitize_filename::sanitize(file_name.trim());
    if sanitized.is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}

/// Reads the `file` field of a multipart form and checks its extension.
pub async fn read_result_file(
    mut multipart: Multipart,
) -> Result<UploadedFile, (StatusCode, String)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart field: {}", e),
        )
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(sanitize_upload_name)
            .ok_or_else(|| (StatusCode::BAD_REQUEST, "fileName is required".to_string()))?;

        let data = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Failed to read file: {}", e),
            )
        })?;

        let file = UploadedFile::new(file_name, data);
        let allowed = file
            .extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));
        if !allowed {
            return Err((
                StatusCode::BAD_REQUEST,
                "Only CSV and Excel files are allowed!".to_string(),
            ));
        }

        return Ok(file);
    }

    Err((StatusCode::BAD_REQUEST, "No file provided".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_upload_name_strips_path_separators() {
        let name = sanitize_upload_name("../../etc/results.csv");
        assert!(!name.contains('/'));
        assert!(name.ends_with("results.csv"));
    }

    #[test]
    fn test_sanitize_upload_name_falls_back_when_empty() {
        assert_eq!(sanitize_upload_name("   "), "upload");
    }

    #[test]
    fn test_extension_is_lower_cased() {
        let file = UploadedFile::new("Results.XLSX", Vec::<u8>::new());
        assert_eq!(file.extension().as_deref(), Some("xlsx"));
        assert_eq!(UploadedFile::new("results", Vec::<u8>::new()).extension(), None);
    }
}
