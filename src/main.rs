use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use projectforge::auth::{AuthMiddleware, AuthService, TokenService};
use projectforge::config::Config;
use projectforge::email::SmtpMailer;
use projectforge::routes;
use projectforge::services::{NoteService, ProjectService, TaskService};
use projectforge::store::postgres::PgStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let store = Arc::new(PgStore::new(pool));
    let tokens = TokenService::new(config.jwt.clone());
    let mailer = Arc::new(SmtpMailer::new(config.smtp.clone()));

    let auth_service = web::Data::new(AuthService::new(store.clone(), mailer, tokens));
    let project_service = web::Data::new(ProjectService::new(store.clone(), store.clone()));
    let task_service = web::Data::new(TaskService::new(store.clone(), store.clone()));
    let note_service = web::Data::new(NoteService::new(store.clone(), store.clone()));

    let access_secret = config.jwt.access_secret.clone();
    log::info!("Starting ProjectForge server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(auth_service.clone())
            .app_data(project_service.clone())
            .app_data(task_service.clone())
            .app_data(note_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api/v1")
                    .wrap(AuthMiddleware::new(access_secret.clone()))
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await
}
