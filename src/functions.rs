// src/functions.rs
//
// Standalone per-route entry points, the function-deployment counterpart of
// the long-lived server. Each route owns its own collection seeded with the
// demo tasks; nothing is shared with the server variant or between routes,
// so callers must not assume consistency across deployments.

use std::sync::Mutex;

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

use crate::models::task::{CreateTaskRequest, UpdateTaskRequest};
use crate::projection::{self, StatusFilter};
use crate::repository::{Clock, TaskRepository};
use crate::seed;
use crate::storage::NoopStore;
use crate::tasks::{error_response, internal_error, not_allowed};

/// State owned by a single entry point.
pub struct TasksFunction {
    repo: Mutex<TaskRepository>,
}

impl TasksFunction {
    /// Fresh non-persistent collection seeded with the demo tasks.
    pub fn seeded() -> Self {
        let clock = Clock::system();
        let tasks = seed::demo_tasks(&clock);
        Self {
            repo: Mutex::new(TaskRepository::with_tasks(Box::new(NoopStore), clock, tasks)),
        }
    }
}

/// Query parameters for the tasks entry point. Ids ride in `?id=` because a
/// single-function route has no path parameters.
#[derive(Debug, Deserialize)]
pub struct TasksQuery {
    pub id: Option<String>,
    pub filter: Option<StatusFilter>,
    pub search: Option<String>,
}

/// Mounts the entry points. Every resource carries its own state so the
/// routes stay isolated, matching independent function deployments.
pub fn configure(
    tasks_state: web::Data<TasksFunction>,
    clear_state: web::Data<TasksFunction>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::resource("/api/tasks/clear-completed")
                .app_data(clear_state)
                .route(web::route().to(clear_completed_entry)),
        )
        .service(
            web::resource("/api/tasks")
                .app_data(tasks_state)
                .route(web::route().to(tasks_entry)),
        )
        .service(web::resource("/api/health").route(web::route().to(health_entry)))
        .default_service(web::route().to(not_found_entry));
    }
}

/// Entry point for /api/tasks: dispatches on the request method the way a
/// single-function deployment does.
pub async fn tasks_entry(
    req: HttpRequest,
    state: web::Data<TasksFunction>,
    query: web::Query<TasksQuery>,
    body: web::Bytes,
) -> impl Responder {
    let mut repo = match state.repo.lock() {
        Ok(repo) => repo,
        Err(e) => {
            error!("Task state lock poisoned: {}", e);
            return internal_error();
        }
    };

    match req.method().as_str() {
        "GET" => {
            let filter = query.filter.unwrap_or_default();
            let search = query.search.as_deref().unwrap_or("");
            let visible = projection::visible(repo.list(), filter, search);
            HttpResponse::Ok().json(json!({
                "success": true,
                "data": visible,
                "count": visible.len(),
                "counts": projection::counts(repo.list()),
            }))
        }
        "POST" => {
            let payload: CreateTaskRequest = serde_json::from_slice(&body).unwrap_or_default();
            match repo.create(&payload.title, &payload.description) {
                Ok(task) => {
                    info!("Task created: {}", task.id);
                    HttpResponse::Created().json(json!({
                        "success": true,
                        "data": task,
                        "message": "Task created successfully",
                    }))
                }
                Err(e) => error_response(e),
            }
        }
        "PUT" => {
            let id = match query.id.as_deref() {
                Some(id) => id,
                None => return missing_id(),
            };
            let changes: UpdateTaskRequest = serde_json::from_slice(&body).unwrap_or_default();
            match repo.update(id, &changes) {
                Ok(task) => {
                    info!("Task updated: {}", task.id);
                    HttpResponse::Ok().json(json!({
                        "success": true,
                        "data": task,
                        "message": "Task updated successfully",
                    }))
                }
                Err(e) => error_response(e),
            }
        }
        "DELETE" => {
            let id = match query.id.as_deref() {
                Some(id) => id,
                None => return missing_id(),
            };
            match repo.delete(id) {
                Ok(task) => {
                    info!("Task deleted: {}", task.id);
                    HttpResponse::Ok().json(json!({
                        "success": true,
                        "data": task,
                        "message": "Task deleted successfully",
                    }))
                }
                Err(e) => error_response(e),
            }
        }
        "OPTIONS" => HttpResponse::Ok().finish(),
        _ => not_allowed(&req, "GET, POST, PUT, DELETE"),
    }
}

/// Entry point for /api/tasks/clear-completed. Owns its own collection, so
/// it only ever clears tasks completed through this route.
pub async fn clear_completed_entry(
    req: HttpRequest,
    state: web::Data<TasksFunction>,
) -> impl Responder {
    match req.method().as_str() {
        "POST" => {
            let mut repo = match state.repo.lock() {
                Ok(repo) => repo,
                Err(e) => {
                    error!("Task state lock poisoned: {}", e);
                    return internal_error();
                }
            };
            let cleared = repo.clear_completed();
            info!("Cleared {} completed tasks", cleared);
            HttpResponse::Ok().json(json!({
                "success": true,
                "cleared": cleared,
                "message": format!("Cleared {} completed tasks", cleared),
            }))
        }
        "OPTIONS" => HttpResponse::Ok().finish(),
        _ => not_allowed(&req, "POST"),
    }
}

/// Entry point for /api/health. Stateless.
pub async fn health_entry(req: HttpRequest) -> impl Responder {
    match req.method().as_str() {
        "GET" => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Task Manager API is running",
            "timestamp": Utc::now(),
            "endpoints": {
                "tasks": "/api/tasks",
                "health": "/api/health",
            },
        })),
        "OPTIONS" => HttpResponse::Ok().finish(),
        _ => not_allowed(&req, "GET"),
    }
}

/// Catch-all for paths with no entry point.
pub async fn not_found_entry() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "error": "API endpoint not found",
    }))
}

fn missing_id() -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "error": "Task ID is required",
    }))
}
