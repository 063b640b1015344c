use axum::{Json, Router, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new().route("/health", get(health_check))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "up")]
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthResponse),
        (status = 503, description = "Database is unreachable")
    ),
    tag = "Health"
)]
pub async fn health_check() -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, String)> {
    let db = get_database_connection()?;

    db.ping().await.map_err(|e| {
        tracing::error!("Database ping failed: {}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "Database is unreachable".to_string(),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            database: "up".to_string(),
        }),
    ))
}
