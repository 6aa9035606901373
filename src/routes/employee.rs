//! Employee surface: the caller's own tasks and their status.
//!
//! Only reachable with an EMPLOYEE principal; the admission table on the
//! `/api/employee` prefix enforces that before any handler here runs.

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Task, TaskStatusUpdate},
};
use actix_web::{get, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

const TASK_COLUMNS: &str =
    "id, title, description, priority, status, due_date, created_at, updated_at, employee_id";

/// Lists the tasks assigned to the calling employee, most imminent due date
/// first.
#[get("/tasks")]
pub async fn list_my_tasks(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE employee_id = $1
         ORDER BY due_date DESC NULLS LAST, created_at DESC",
        TASK_COLUMNS
    ))
    .bind(current_user.0.id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves one of the caller's tasks.
///
/// A task assigned to somebody else answers 404, not 403: employees cannot
/// probe which task ids exist.
#[get("/tasks/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) if task.employee_id == current_user.0.id => {
            Ok(HttpResponse::Ok().json(task))
        }
        _ => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Moves one of the caller's tasks to a new status.
#[put("/tasks/{id}/status")]
pub async fn update_task_status(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    update: web::Json<TaskStatusUpdate>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET status = $1, updated_at = NOW()
         WHERE id = $2 AND employee_id = $3
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(update.status)
    .bind(task_id.into_inner())
    .bind(current_user.0.id)
    .fetch_optional(&**pool)
    .await?;

    match result {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}
