mod auth;
mod config;
mod context;
mod db;
mod error;
mod job_controller;
mod mail;
mod repository;
mod services;

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use tokio::sync::{mpsc, RwLock};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::job_controller::state::JobsState;
use crate::mail::{LogNotifier, Notifier, SmtpNotifier};
use crate::repository::collaborator::SqliteCollaboratorRepo;
use crate::repository::user::SqliteUserRepo;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let config = Arc::new(config);

    db::init(&config.database_path).map_err(|e| io::Error::other(e.to_string()))?;
    std::fs::create_dir_all(&config.uploads_dir)?;

    // Job controller state + central updater task.
    let (tx, rx) = mpsc::channel(100);
    let jobs_state = JobsState {
        jobs: Arc::new(RwLock::new(HashMap::new())),
        tx,
    };
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    // Wire the storage and notification collaborators once, here.
    let notifier: Arc<dyn Notifier> = match &config.smtp {
        Some(smtp) => Arc::new(
            SmtpNotifier::new(smtp).map_err(|e| io::Error::other(e.to_string()))?,
        ),
        None => {
            info!("SMTP not configured, import summaries go to the log");
            Arc::new(LogNotifier)
        }
    };
    let app_ctx = AppContext {
        config: config.clone(),
        collaborators: Arc::new(SqliteCollaboratorRepo::new(&config.database_path)),
        users: Arc::new(SqliteUserRepo::new(&config.database_path)),
        notifier,
    };

    let bind = (config.host.clone(), config.port);
    info!("server running at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(web::Data::new(app_ctx.clone()))
            .service(services::auth::configure_routes())
            .service(services::users::configure_routes())
            .service(services::collaborators::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}
