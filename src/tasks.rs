// src/tasks.rs

use actix_web::{http::header, http::Method, web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

use crate::app_state::AppState;
use crate::error::TaskError;
use crate::models::task::{CreateTaskRequest, UpdateTaskRequest};
use crate::projection::{self, StatusFilter};

/// Query parameters accepted by GET /api/tasks.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub filter: Option<StatusFilter>,
    pub search: Option<String>,
}

/// Mounts the /api route tree. Shared by the server binary and the handler
/// tests so both run the exact same wiring.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/tasks/clear-completed")
                    .route(web::post().to(clear_completed))
                    .default_service(web::route().to(clear_completed_fallback)),
            )
            .service(
                web::resource("/tasks")
                    .route(web::get().to(list_tasks))
                    .route(web::post().to(create_task))
                    .default_service(web::route().to(tasks_fallback)),
            )
            .service(
                web::resource("/tasks/{id}")
                    .route(web::put().to(update_task))
                    .route(web::delete().to(delete_task))
                    .default_service(web::route().to(task_fallback)),
            )
            .service(
                web::resource("/health")
                    .route(web::get().to(health))
                    .default_service(web::route().to(health_fallback)),
            )
            .default_service(web::route().to(api_not_found)),
    );
}

/// GET /api/tasks
/// List tasks, optionally narrowed by `filter` (all|pending|completed) and a
/// case-insensitive `search` term. `counts` always reflects the full
/// collection so clients can render badge totals while narrowed.
pub async fn list_tasks(
    data: web::Data<AppState>,
    query: web::Query<ListTasksQuery>,
) -> impl Responder {
    let repo = match data.tasks.lock() {
        Ok(repo) => repo,
        Err(e) => {
            error!("Task state lock poisoned: {}", e);
            return internal_error();
        }
    };

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

/// POST /api/tasks
/// Create a new task. The title is required and trimmed before storage.
pub async fn create_task(
    data: web::Data<AppState>,
    payload: web::Json<CreateTaskRequest>,
) -> impl Responder {
    let mut repo = match data.tasks.lock() {
        Ok(repo) => repo,
        Err(e) => {
            error!("Task state lock poisoned: {}", e);
            return internal_error();
        }
    };

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

/// PUT /api/tasks/{id}
/// Apply a partial update to an existing task.
pub async fn update_task(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTaskRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let mut repo = match data.tasks.lock() {
        Ok(repo) => repo,
        Err(e) => {
            error!("Task state lock poisoned: {}", e);
            return internal_error();
        }
    };

    match repo.update(&id, &payload) {
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

/// DELETE /api/tasks/{id}
/// Remove a task and return it.
pub async fn delete_task(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let mut repo = match data.tasks.lock() {
        Ok(repo) => repo,
        Err(e) => {
            error!("Task state lock poisoned: {}", e);
            return internal_error();
        }
    };

    match repo.delete(&id) {
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

/// POST /api/tasks/clear-completed
/// Remove every completed task, reporting how many were cleared.
pub async fn clear_completed(data: web::Data<AppState>) -> impl Responder {
    let mut repo = match data.tasks.lock() {
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

/// GET /api/health
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Task Manager API is running",
        "timestamp": Utc::now(),
    }))
}

/// Catch-all for unmatched /api paths.
pub async fn api_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "error": "API endpoint not found",
    }))
}

pub async fn tasks_fallback(req: HttpRequest) -> HttpResponse {
    not_allowed(&req, "GET, POST")
}

pub async fn task_fallback(req: HttpRequest) -> HttpResponse {
    not_allowed(&req, "PUT, DELETE")
}

pub async fn clear_completed_fallback(req: HttpRequest) -> HttpResponse {
    not_allowed(&req, "POST")
}

pub async fn health_fallback(req: HttpRequest) -> HttpResponse {
    not_allowed(&req, "GET")
}

/// 405 with an Allow header for known resources hit with an unsupported
/// method; bare OPTIONS still answers 200 for preflight.
pub(crate) fn not_allowed(req: &HttpRequest, allow: &'static str) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::Ok().finish();
    }
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, allow))
        .json(json!({
            "success": false,
            "error": format!("Method {} not allowed", req.method()),
        }))
}

pub(crate) fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "error": "Internal server error",
    }))
}

/// Maps repository failures onto the wire envelope.
pub(crate) fn error_response(err: TaskError) -> HttpResponse {
    match err {
        TaskError::ValidationFailed => HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": err.to_string(),
        })),
        TaskError::NotFound => HttpResponse::NotFound().json(json!({
            "success": false,
            "error": err.to_string(),
        })),
        TaskError::StorageUnavailable(_) => {
            error!("Unexpected storage error: {}", err);
            internal_error()
        }
    }
}
