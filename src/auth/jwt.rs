//! JWT token generation and validation

use crate::{config::AppConfig, error::AppError};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime: 24 hours
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

impl Claims {
    /// Claims for a token issued now
    pub fn new(user_id: Uuid, email: &str) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user_id,
            email: email.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        }
    }
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Create JWT service from a raw secret
    pub fn new(secret: &str) -> Result<Self, AppError> {
        // HS256 needs at least 32 bytes of key material
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(config.security.jwt_secret.expose_secret())
    }

    /// Issue a token for the given identity, valid for [`TOKEN_TTL_SECS`]
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        self.sign(&Claims::new(user_id, email))
    }

    /// Sign arbitrary claims
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Verify signature and expiry; every failure is `InvalidToken`
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_32_characters_long!";

    #[test]
    fn test_issue_and_verify() {
        let service = JwtService::new(SECRET).unwrap();
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "a@x.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_claims_use_camel_case() {
        let claims = Claims::new(Uuid::new_v4(), "a@x.com");
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(JwtService::new("short").is_err());
    }

    #[test]
    fn test_expired_token_fails() {
        let service = JwtService::new(SECRET).unwrap();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            iat: now - 2 * TOKEN_TTL_SECS,
            exp: now - TOKEN_TTL_SECS,
        };
        let token = service.sign(&claims).unwrap();

        assert!(matches!(service.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let issuer = JwtService::new(SECRET).unwrap();
        let other = JwtService::new("another_secret_key_32_characters_long").unwrap();

        let token = issuer.issue(Uuid::new_v4(), "a@x.com").unwrap();
        assert!(matches!(other.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_invalid_token_fails() {
        let service = JwtService::new(SECRET).unwrap();
        assert!(matches!(service.verify("garbage"), Err(AppError::InvalidToken)));
        assert!(matches!(service.verify(""), Err(AppError::InvalidToken)));
    }
}
