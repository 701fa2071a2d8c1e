use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::types::error::AppError;
use crate::types::token::{Claims, TokenPairRes, TokenType};

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// False for a wrong password and for a stored hash that does not parse.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Checks `password` against `hash`, or against a decoy hash when there is none,
/// so unknown usernames cost the same argon2 work as known ones. A missing hash never matches.
pub fn check_password(password: &str, hash: Option<&str>) -> bool {
    match hash {
        Some(hash) => verify_password(password, hash),
        None => {
            if let Some(decoy) = DECOY_HASH.get_or_init(|| hash_password("decoy-password").ok()) {
                verify_password(password, decoy);
            }
            false
        }
    }
}

pub fn issue(user_id: Uuid, token_type: TokenType, jwt: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let ttl = match token_type {
        TokenType::Access => jwt.access_ttl_secs,
        TokenType::Refresh => jwt.refresh_ttl_secs,
    };
    let claims = Claims {
        token_type,
        user_id,
        exp: now + ttl,
        iat: now,
        jti: new_id().simple().to_string(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(jwt.secret.as_bytes()))
        .map_err(|e| AppError::Internal(format!("token encoding failed: {e}")))
}

pub fn issue_pair(user_id: Uuid, jwt: &JwtConfig) -> Result<TokenPairRes, AppError> {
    Ok(TokenPairRes {
        refresh: issue(user_id, TokenType::Refresh, jwt)?,
        access: issue(user_id, TokenType::Access, jwt)?,
    })
}

/// Verifies signature and expiry, then that the token is of the `expected` kind.
pub fn verify(token: &str, expected: TokenType, jwt: &JwtConfig) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AppError::Unauthorized(AppError::BAD_TOKEN))?;

    if data.claims.token_type != expected {
        return Err(AppError::Unauthorized(AppError::BAD_TOKEN));
    }
    Ok(data.claims)
}
