use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use sqlx::PgPool;

use tasktrack::auth::{AuthMiddleware, TokenIssuer};
use tasktrack::config::Config;
use tasktrack::mail::{LogMailer, Mailer};
use tasktrack::routes;
use tasktrack::services::{AuthService, TaskService};
use tasktrack::store::{PgTaskStore, PgUserStore, TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let issuer = TokenIssuer::new(&config.jwt_secret);
    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let tasks: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool.clone()));
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

    let auth_service = AuthService::new(
        users,
        issuer.clone(),
        mailer,
        config.reset_link_base.clone(),
    );
    let task_service = TaskService::new(tasks);

    log::info!("Starting TaskTrack server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(task_service.clone()))
            .app_data(routes::json_config())
            .configure(routes::config)
            .wrap(AuthMiddleware::new(issuer.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
