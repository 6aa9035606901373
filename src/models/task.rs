use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum; serialized uppercase
/// ("INPROGRESS", not "IN_PROGRESS") to match the existing client.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    #[sqlx(rename = "INPROGRESS")]
    #[serde(rename = "INPROGRESS")]
    InProgress,
    Completed,
    Deferred,
    Cancelled,
}

/// Input structure for creating or updating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub priority: Option<TaskPriority>,

    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,

    /// The employee the task is assigned to.
    pub employee_id: i32,

    /// Status override, honored on update only. Creation always starts a
    /// task in `InProgress`, whatever the body says.
    pub status: Option<TaskStatus>,
}

/// Body for an employee's status update on one of their tasks.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStatusUpdate {
    pub status: TaskStatus,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Identifier of the employee the task is assigned to.
    pub employee_id: i32,
}

impl Task {
    /// Creates a new `Task` from `TaskInput`.
    ///
    /// New tasks start in `InProgress`: assignment happens at creation time,
    /// so there is no unassigned "pending" window.
    pub fn new(input: TaskInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            priority: input.priority,
            status: TaskStatus::InProgress,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            employee_id: input.employee_id,
        }
    }
}
