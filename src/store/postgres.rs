//! Postgres-backed store.
//!
//! Documents map to one row per user/project/task/note; nested sequences
//! (members, sub-tasks, attachments) live in JSONB columns so updates stay
//! single-row full replaces, matching the last-writer-wins contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    Attachment, Note, Project, ProjectMember, SubTask, Task, TaskStatus, User,
};

use super::{NoteStore, ProjectStore, TaskStore, UserStore};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, role, is_email_verified, \
     verification_token, reset_token, reset_token_expiry, refresh_token, created_at, updated_at";

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, is_email_verified, \
             verification_token, reset_token, reset_token_expiry, refresh_token, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.is_email_verified)
        .bind(&user.verification_token)
        .bind(&user.reset_token)
        .bind(user.reset_token_expiry)
        .bind(&user.refresh_token)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict("email already registered".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE verification_token = $1",
            USER_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_reset_token(&self, token: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE reset_token = $1",
            USER_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET name = $2, email = $3, password_hash = $4, role = $5, \
             is_email_verified = $6, verification_token = $7, reset_token = $8, \
             reset_token_expiry = $9, refresh_token = $10, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.is_email_verified)
        .bind(&user.verification_token)
        .bind(&user.reset_token)
        .bind(user.reset_token_expiry)
        .bind(&user.refresh_token)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    description: String,
    members: Json<Vec<ProjectMember>>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            members: row.members.0,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn create_project(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO projects (id, name, description, members, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(Json(&project.members))
        .bind(project.created_by)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, name, description, members, created_by, created_at, updated_at \
             FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Project::from))
    }

    async fn find_projects_by_member(&self, user_id: Uuid) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, name, description, members, created_by, created_at, updated_at \
             FROM projects \
             WHERE EXISTS (SELECT 1 FROM jsonb_array_elements(members) m \
                           WHERE m->>'user_id' = $1::text) \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn update_project(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE projects SET name = $2, description = $3, members = $4, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(Json(&project.members))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(FromRow)]
struct TaskRow {
    id: Uuid,
    project_id: Uuid,
    title: String,
    description: String,
    status: TaskStatus,
    assigned_to: Option<Uuid>,
    attachments: Json<Vec<Attachment>>,
    sub_tasks: Json<Vec<SubTask>>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            project_id: row.project_id,
            title: row.title,
            description: row.description,
            status: row.status,
            assigned_to: row.assigned_to,
            attachments: row.attachments.0,
            sub_tasks: row.sub_tasks.0,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TASK_COLUMNS: &str = "id, project_id, title, description, status, assigned_to, \
     attachments, sub_tasks, created_by, created_at, updated_at";

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(&self, task: &Task) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO tasks (id, project_id, title, description, status, assigned_to, \
             attachments, sub_tasks, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(task.id)
        .bind(task.project_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.assigned_to)
        .bind(Json(&task.attachments))
        .bind(Json(&task.sub_tasks))
        .bind(task.created_by)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Task::from))
    }

    async fn find_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, AppError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC",
            TASK_COLUMNS
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn update_task(&self, task: &Task) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE tasks SET title = $2, description = $3, status = $4, assigned_to = $5, \
             attachments = $6, sub_tasks = $7, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.assigned_to)
        .bind(Json(&task.attachments))
        .bind(Json(&task.sub_tasks))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create_note(&self, note: &Note) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO notes (id, project_id, title, content, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(note.id)
        .bind(note.project_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.created_by)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_note_by_id(&self, id: Uuid) -> Result<Option<Note>, AppError> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT id, project_id, title, content, created_by, created_at, updated_at \
             FROM notes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn find_notes_by_project(&self, project_id: Uuid) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, project_id, title, content, created_by, created_at, updated_at \
             FROM notes WHERE project_id = $1 ORDER BY created_at DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn update_note(&self, note: &Note) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE notes SET title = $2, content = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_note(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
