use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use http::StatusCode;

use crate::config::APP_CONFIG;
use crate::utils::jwt::{JwtManager, TokenClaims};

/// Claims of the bearer token sent with the request.
///
/// Add it as a handler parameter to require a logged-in administrator session.
pub struct AuthClaims(pub TokenClaims);

impl AuthClaims {
    pub fn require_admin(&self) -> Result<(), (StatusCode, String)> {
        if self.0.is_admin {
            Ok(())
        } else {
            Err((StatusCode::FORBIDDEN, "Admin access required".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    (
                        StatusCode::UNAUTHORIZED,
                        "Please log in to access this page.".to_string(),
                    )
                })?;

        let claims = JwtManager::new(APP_CONFIG.jwt_secret.clone())
            .verify_jwt(bearer.token())
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid or expired token".to_string(),
                )
            })?;

        Ok(AuthClaims(claims))
    }
}
