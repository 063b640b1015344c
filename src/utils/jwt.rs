use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub user_id: i32,
    pub is_admin: bool,
    pub exp: usize,
    pub iat: usize,
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn create_jwt(
        &self,
        user_id: i32,
        username: &str,
        is_admin: bool,
        expires_in: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: username.to_string(),
            user_id,
            is_admin,
            exp: (now + expires_in) as usize,
            iat: now as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn verify_jwt(&self, token: &str) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_jwt() {
        let manager = JwtManager::new("test-secret");
        let token = manager.create_jwt(7, "admin", true, 3600).unwrap();

        let claims = manager.verify_jwt(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "admin");
        assert!(claims.is_admin);
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let token = JwtManager::new("one-secret")
            .create_jwt(1, "admin", true, 3600)
            .unwrap();

        assert!(JwtManager::new("another-secret").verify_jwt(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let manager = JwtManager::new("test-secret");
        let token = manager.create_jwt(1, "admin", true, -3600).unwrap();

        assert!(manager.verify_jwt(&token).is_err());
    }
}
