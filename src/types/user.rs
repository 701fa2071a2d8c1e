use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use entity::user::{ActiveModel as UserActive, Model as UserModel};
use sea_orm::Set;

use crate::types::error::AppError;
use crate::types::validation::{self, FieldReader};

/// Public view of an account. Credentials and flags never leave the service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRes {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    pub address: Option<String>,
}

impl From<UserModel> for UserRes {
    fn from(m: UserModel) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            phone: m.phone,
            profile_picture: m.profile_picture,
            address: m.address,
        }
    }
}

/// Write payload for `/users/`. `password` is write-only and hashed before it is stored.
#[derive(Debug, Default)]
pub struct RUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub profile_picture: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub password: Option<String>,
}

impl RUser {
    pub fn read(body: Map<String, Value>, partial: bool) -> Result<Self, AppError> {
        let mut r = FieldReader::new(body, partial);

        let username = r.required::<String>("username");
        let username = r.check("username", username, |v| validation::username(v));
        let email = r.optional::<String>("email");
        let email = r.check("email", email, |v| validation::email(v));
        let phone = r.nullable::<String>("phone");
        let phone = r.check("phone", phone, |v| validation::nullable_text(v, Some(15)));
        let profile_picture = r.nullable::<String>("profile_picture");
        let profile_picture = r.check("profile_picture", profile_picture, |v| validation::nullable_text(v, Some(100)));
        let address = r.nullable::<String>("address");
        let password = r.optional::<String>("password");
        let password = r.check("password", password, |v| validation::not_blank(v));

        r.finish(Self { username, email, phone, profile_picture, address, password })
    }

    /// Copies every provided field onto `am`; the password is handled by the caller.
    pub fn apply(self, am: &mut UserActive) {
        if let Some(v) = self.username { am.username = Set(v); }
        if let Some(v) = self.email { am.email = Set(v); }
        if let Some(v) = self.phone { am.phone = Set(v); }
        if let Some(v) = self.profile_picture { am.profile_picture = Set(v); }
        if let Some(v) = self.address { am.address = Set(v); }
    }
}
