//! Admin surface: user listing and full task management.
//!
//! Only reachable with an ADMIN principal; the admission table on the
//! `/api/admin` prefix enforces that before any handler here runs.

use crate::{
    error::AppError,
    models::{Task, TaskInput, UserResponse, UserRole},
    store::UserStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TASK_COLUMNS: &str =
    "id, title, description, priority, status, due_date, created_at, updated_at, employee_id";

/// Lists all employee accounts. Admins are not shown; they are not
/// assignable.
#[get("/users")]
pub async fn list_employees(
    store: web::Data<dyn UserStore>,
) -> Result<impl Responder, AppError> {
    let employees = store.list_by_role(UserRole::Employee).await?;
    let employees: Vec<UserResponse> = employees.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(employees))
}

async fn employee_exists(pool: &PgPool, employee_id: i32) -> Result<bool, AppError> {
    let row = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE id = $1 AND role = $2")
        .bind(employee_id)
        .bind(UserRole::Employee)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Creates a task assigned to an employee.
///
/// Assignment happens at creation, so new tasks start in `INPROGRESS`.
#[post("/tasks")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let input = task_data.into_inner();
    if !employee_exists(&pool, input.employee_id).await? {
        return Err(AppError::NotFound("Employee not found".into()));
    }

    let task = Task::new(input);
    let result = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, description, priority, status, due_date, created_at, updated_at, employee_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.priority)
    .bind(task.status)
    .bind(task.due_date)
    .bind(task.created_at)
    .bind(task.updated_at)
    .bind(task.employee_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Lists every task, most imminent due date first.
#[get("/tasks")]
pub async fn list_tasks(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks ORDER BY due_date DESC NULLS LAST, created_at DESC",
        TASK_COLUMNS
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Searches tasks whose title contains the given fragment (case-insensitive).
#[get("/tasks/search/{title}")]
pub async fn search_tasks(
    pool: web::Data<PgPool>,
    title: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let pattern = format!("%{}%", title.into_inner());
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE title ILIKE $1 ORDER BY due_date DESC NULLS LAST, created_at DESC",
        TASK_COLUMNS
    ))
    .bind(pattern)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a single task by id.
#[get("/tasks/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Updates a task, including re-assignment to another employee.
///
/// A status in the body replaces the stored one; omitting it keeps the
/// current status.
#[put("/tasks/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let input = task_data.into_inner();
    if !employee_exists(&pool, input.employee_id).await? {
        return Err(AppError::NotFound("Employee not found".into()));
    }

    let result = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks
         SET title = $1, description = $2, priority = $3, due_date = $4,
             status = COALESCE($5, status), employee_id = $6, updated_at = NOW()
         WHERE id = $7
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.priority)
    .bind(input.due_date)
    .bind(input.status)
    .bind(input.employee_id)
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match result {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task by id. Comments on it go with it.
#[delete("/tasks/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id.into_inner())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
