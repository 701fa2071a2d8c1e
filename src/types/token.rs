use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub token_type: TokenType,
    pub user_id: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTokenObtain {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenPairRes {
    pub refresh: String,
    pub access: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTokenRefresh {
    pub refresh: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AccessTokenRes {
    pub access: String,
}
