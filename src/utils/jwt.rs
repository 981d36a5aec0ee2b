use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// JWT claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at
    pub iat: usize,
    /// Expiration
    pub exp: usize,
    /// Caller role (admin, hod, teacher, student, finance)
    pub role: String,
    /// Token type (access, refresh)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Create an access token for a user id and role.
pub fn encode_access_token(
    sub: String,
    role: String,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(expiration_seconds))
        .ok_or_else(|| AppError::InternalError("Token expiration overflow".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub,
        iat: now.timestamp() as usize,
        exp: expiration,
        role,
        token_type: Some("access".to_string()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// Validate and decode an access token.
///
/// Rejects tokens whose `token_type` is present but not `access`.
pub fn decode_access_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token.".to_string()))?;

    if let Some(token_type) = &token_data.claims.token_type {
        if token_type != "access" {
            return Err(AppError::Unauthorized(
                "Not an access token.".to_string(),
            ));
        }
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn should_round_trip_role_claim() {
        let token =
            encode_access_token("42".to_string(), "hod".to_string(), SECRET, 3600).unwrap();
        let claims = decode_access_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "hod");
        assert_eq!(claims.token_type.as_deref(), Some("access"));
    }

    #[test]
    fn should_reject_token_signed_with_other_secret() {
        let token =
            encode_access_token("42".to_string(), "admin".to_string(), "other", 3600).unwrap();
        let result = decode_access_token(&token, SECRET);

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn should_reject_expired_token() {
        let token =
            encode_access_token("42".to_string(), "teacher".to_string(), SECRET, -3600).unwrap();
        let result = decode_access_token(&token, SECRET);

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
