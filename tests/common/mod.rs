use std::sync::Arc;

use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

use gp_booking::config::{EnvConfig, JwtConfig, CONFIG};
use gp_booking::db::postgres_service::PostgresService;
use gp_booking::policy::PolicyTable;

pub mod client;

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        CONFIG.get_or_init(get_test_config);

        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService")
        );

        TestContext {
            db,
            _container: container,
        }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "test".to_string(), // Not used in tests
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            ..JwtConfig::default()
        },
        access_policy: PolicyTable::default(),
        cors_origins: Vec::new(),
    }
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use serde_json::{json, Value};
    use uuid::Uuid;

    pub const PASSWORD: &str = "correct-horse";

    pub fn sample_doctor() -> Value {
        json!({
            "name": "Dr. Ada Byrne",
            "specialization": "General Practice",
            "bio": "Twenty years in family medicine.",
            "contact_info": "ada@clinic.example",
            "clinic_address": "1 High Street",
            "price_per_appointment": "45.00"
        })
    }

    pub fn sample_slot(doctor: Uuid, date: &str, start: &str) -> Value {
        json!({
            "doctor": doctor,
            "date": date,
            "start_time": start,
            "end_time": "17:00:00"
        })
    }

    pub fn sample_appointment(doctor: Uuid) -> Value {
        json!({
            "doctor": doctor,
            "date": "2025-03-01",
            "time": "10:15:00"
        })
    }
}
