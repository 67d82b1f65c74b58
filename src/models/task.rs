use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

/// A file attached to a task. Append-only from the task service's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub url: String,
    pub mime_type: String,
    pub size: i64,
}

/// A sub-task carried inline on its parent task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubTask {
    pub id: Uuid,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl SubTask {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}

/// A task belonging to a project. The owning project reference is immutable
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: Option<Uuid>,
    pub attachments: Vec<Attachment>,
    pub sub_tasks: Vec<SubTask>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` in `Todo` status under the given project.
    pub fn new(
        project_id: Uuid,
        title: String,
        description: String,
        assigned_to: Option<Uuid>,
        created_by: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            title,
            description,
            status: TaskStatus::Todo,
            assigned_to,
            attachments: Vec::new(),
            sub_tasks: Vec::new(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input structure for creating a task.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
    /// Optional assignee user id, as a string to be validated by the service.
    pub assigned_to: Option<String>,
}

/// Partial update for a task. Each field is applied only when present.
///
/// Members without an elevated role may only submit a patch that carries
/// `status` and nothing else; unrecognized JSON keys are dropped during
/// deserialization and never reach the permission check.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TaskPatch {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
}

impl TaskPatch {
    /// True when the patch carries a status change and no other field.
    pub fn is_status_only(&self) -> bool {
        self.status.is_some()
            && self.title.is_none()
            && self.description.is_none()
            && self.assigned_to.is_none()
    }
}

/// Payload for creating a sub-task.
#[derive(Debug, Deserialize, Validate)]
pub struct SubTaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

/// Payload for toggling a sub-task's completion flag.
#[derive(Debug, Deserialize)]
pub struct SubTaskPatch {
    pub is_completed: bool,
}
