use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{LoginRequest, LoginResponse};
use crate::config::{APP_CONFIG, JWT_EXPRIED_TIME};
use crate::repositories::UserRepository;
use crate::routes::internal_error;
use crate::static_service::get_database_connection;
use crate::utils::jwt::JwtManager;

pub fn create_route() -> Router {
    Router::new().route("/api/v1/auth/login", post(login))
}

/// Login endpoint - returns JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), (StatusCode, String)> {
    let db = get_database_connection()?;
    let user_repo = UserRepository::new(db);

    let user_info = user_repo
        .find_by_username(payload.username.trim())
        .await
        .map_err(internal_error("look up user"))?
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            )
        })?;

    let password_valid =
        bcrypt::verify(&payload.password, &user_info.password_hash).map_err(|e| {
            tracing::error!("Password verification error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Password verification error".to_string(),
            )
        })?;

    if !password_valid {
        tracing::info!(username = %user_info.username, "Rejected login attempt");
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid username or password".to_string(),
        ));
    }

    let access_token = JwtManager::new(APP_CONFIG.jwt_secret.clone())
        .create_jwt(
            user_info.user_id,
            &user_info.username,
            user_info.is_admin,
            JWT_EXPRIED_TIME,
        )
        .map_err(internal_error("create token"))?;

    tracing::info!(username = %user_info.username, "User logged in");

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: JWT_EXPRIED_TIME,
            user_id: user_info.user_id,
            username: user_info.username,
            is_admin: user_info.is_admin,
        }),
    ))
}
