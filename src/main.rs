// src/main.rs

use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use task_manager::app_state::AppState;
use task_manager::config::Config;
use task_manager::repository::{Clock, TaskRepository};
use task_manager::seed;
use task_manager::storage::{JsonFileStore, NoopStore};
use task_manager::tasks;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let clock = Clock::system();

    // With a storage directory the collection survives restarts; without one
    // this is the in-memory demo deployment and starts from the seed.
    let repo = match &config.storage_path {
        Some(dir) => TaskRepository::new(Box::new(JsonFileStore::new(dir.clone())), clock),
        None => {
            let demo = seed::demo_tasks(&clock);
            TaskRepository::with_tasks(Box::new(NoopStore), clock, demo)
        }
    };
    let state = web::Data::new(AppState {
        tasks: Mutex::new(repo),
    });

    println!("Task Manager API server running on port {}", config.port);
    println!(
        "Health check: http://localhost:{}/api/health",
        config.port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::ACCEPT])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .configure(tasks::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
