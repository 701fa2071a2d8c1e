use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath, TrailingSlash};
use actix_web::{web, App, HttpServer};
use tracing::info;

use gp_booking::config::{EnvConfig, CONFIG};
use gp_booking::db::postgres_service::PostgresService;
use gp_booking::routes::{configure_routes, cors};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = CONFIG.get_or_init(EnvConfig::from_env);
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .map_err(|e| std::io::Error::other(format!("failed to initialize PostgresService: {e}")))?,
    );
    let policy = web::Data::new(config.access_policy.clone());

    info!(%addr, policy = %config.access_policy, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::new(TrailingSlash::Always))
            .wrap(cors(&config.cors_origins))
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(policy.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
