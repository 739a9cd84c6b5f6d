//! HS256 session tokens

use adhyayan_core::models::{User, UserRole};
use adhyayan_core::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid, // user_id
    pub role: UserRole,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Issues and validates tokens signed with the shared `JWT_SECRET`
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl JwtService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Sign a token for `user`, returning it with its expiry time.
    pub fn issue(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        self.issue_at(user.id, user.role, Utc::now())
    }

    fn issue_at(
        &self,
        user_id: Uuid,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let expires_at = now + self.expiry;
        let claims = JwtClaims {
            sub: user_id,
            role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok((token, expires_at))
    }

    /// Validate and decode a token
    pub fn validate(&self, token: &str) -> Result<JwtClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Token has expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::Unauthorized("Invalid token signature".to_string())
                    }
                    _ => AppError::Unauthorized(format!("Invalid or expired token: {}", e)),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-at-least-32-characters";

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::new(SECRET, 24);
        let user_id = Uuid::new_v4();
        let (token, expires_at) = service
            .issue_at(user_id, UserRole::Admin, Utc::now())
            .unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(SECRET, 1);
        let (token, _) = service
            .issue_at(
                Uuid::new_v4(),
                UserRole::Student,
                Utc::now() - Duration::hours(2),
            )
            .unwrap();

        match service.validate(&token) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token has expired"),
            other => panic!("Expected expired token error, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new(SECRET, 1);
        let other = JwtService::new("another-secret-that-is-also-32-chars-long", 1);
        let (token, _) = issuer
            .issue_at(Uuid::new_v4(), UserRole::Student, Utc::now())
            .unwrap();

        assert!(matches!(
            other.validate(&token),
            Err(AppError::Unauthorized(_))
        ));
        assert!(issuer.validate("not.a.token").is_err());
    }
}
