use std::sync::Arc;

use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{web, App};
use serde_json::{json, Value};

use entity::doctor::Model as DoctorModel;
use entity::user::Model as UserModel;
use gp_booking::{
    config::config,
    db::postgres_service::PostgresService,
    policy::PolicyTable,
    types::{doctor::RDoctor, error::AppError, token::TokenType, user::RUser},
    utils::token::{hash_password, issue},
};

use super::test_data;

pub struct TestClient {
    pub db: Arc<PostgresService>,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient { db }
    }

    /// App under the default (permissive) access policy.
    #[allow(dead_code)]
    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        self.create_app_with(PolicyTable::default(), &[])
    }

    #[allow(dead_code)]
    pub fn create_app_with_policy(&self, policy: PolicyTable) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        self.create_app_with(policy, &[])
    }

    /// `origins` as `CORS_ALLOWED_ORIGINS` would give them; empty allows any origin.
    pub fn create_app_with(&self, policy: PolicyTable, origins: &[String]) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(NormalizePath::new(TrailingSlash::Always))
            .wrap(gp_booking::routes::cors(origins))
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(policy))
            .configure(gp_booking::routes::configure_routes)
    }

    /// Creates an active user with [`test_data::PASSWORD`] and returns it with an access token.
    #[allow(dead_code)]
    pub async fn create_test_user(&self, username: &str) -> Result<(UserModel, String), AppError> {
        let body = json!({ "username": username, "email": format!("{username}@test.com") });
        let payload = RUser::read(as_map(body), false)?;
        let user = self
            .db
            .create_user(payload, Some(hash_password(test_data::PASSWORD)?))
            .await?;
        let access = issue(user.id, TokenType::Access, &config().jwt)?;
        Ok((user, access))
    }

    #[allow(dead_code)]
    pub async fn create_test_doctor(&self) -> DoctorModel {
        let payload = RDoctor::read(as_map(test_data::sample_doctor()), false)
            .expect("sample doctor should be valid");
        self.db.create_doctor(payload).await.expect("Failed to create doctor")
    }
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

fn as_map(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}
