//! Task comments, shared by the admin and employee surfaces.
//!
//! The handlers are registered under both role-gated scopes; the admission
//! table has already decided who gets here, and the attached principal is
//! the comment author.

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Comment, CommentInput, CommentResponse},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Posts a comment on a task, authored by the calling principal.
#[post("/tasks/{id}/comments")]
pub async fn create_comment(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    comment_data: web::Json<CommentInput>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    comment_data.validate()?;

    let task_id = task_id.into_inner();
    let task_exists = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM tasks WHERE id = $1")
        .bind(task_id)
        .fetch_optional(&**pool)
        .await?
        .is_some();
    if !task_exists {
        return Err(AppError::NotFound("Task not found".into()));
    }

    let comment = Comment::new(comment_data.into_inner(), task_id, current_user.0.id);
    sqlx::query(
        "INSERT INTO comments (id, content, created_at, task_id, author_id)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(comment.id)
    .bind(&comment.content)
    .bind(comment.created_at)
    .bind(comment.task_id)
    .bind(comment.author_id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(CommentResponse {
        id: comment.id,
        content: comment.content,
        created_at: comment.created_at,
        task_id: comment.task_id,
        author_name: current_user.0.name,
    }))
}

/// Lists a task's comments in posting order, with author display names.
#[get("/tasks/{id}/comments")]
pub async fn list_comments(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let comments = sqlx::query_as::<_, CommentResponse>(
        "SELECT c.id, c.content, c.created_at, c.task_id, u.name AS author_name
         FROM comments c
         JOIN users u ON u.id = c.author_id
         WHERE c.task_id = $1
         ORDER BY c.created_at",
    )
    .bind(task_id.into_inner())
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(comments))
}
