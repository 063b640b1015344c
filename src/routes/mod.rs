pub mod auth;
pub mod dashboard;
pub mod exams;
pub mod health;
pub mod results;
pub mod students;
pub mod upload;

use http::StatusCode;
use serde::Deserialize;
use utoipa::IntoParams;

/// Logs a database or service failure and hides its detail from the client.
pub(crate) fn internal_error(action: &'static str) -> impl FnOnce(anyhow::Error) -> (StatusCode, String) {
    move |e| {
        tracing::error!("Failed to {}: {:#}", action, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to {}", action),
        )
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<u64>,
}

impl PageQuery {
    /// Missing or zero means the first page.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}
