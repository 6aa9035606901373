use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A comment left on a task by an admin or by the assigned employee.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub task_id: Uuid,
    pub author_id: i32,
}

/// Input structure for posting a comment.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CommentInput {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// A comment as returned by the API, with the author's display name joined in.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub task_id: Uuid,
    pub author_name: String,
}

impl Comment {
    pub fn new(input: CommentInput, task_id: Uuid, author_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: input.content,
            created_at: Utc::now(),
            task_id,
            author_id,
        }
    }
}
