// src/bin/functions.rs

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use task_manager::config::Config;
use task_manager::functions::{self, TasksFunction};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    // One state per route, built once so every worker serves the same
    // collection. The routes never share state with each other.
    let tasks_state = web::Data::new(TasksFunction::seeded());
    let clear_state = web::Data::new(TasksFunction::seeded());

    println!("Task Manager functions running on port {}", config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::ACCEPT])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .configure(functions::configure(
                tasks_state.clone(),
                clear_state.clone(),
            ))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
