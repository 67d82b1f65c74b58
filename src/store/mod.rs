//! Persistence contracts for the credential store and resource collections.
//!
//! Each trait is a narrow capability interface: document-level reads plus
//! full-document replaces with last-writer-wins semantics. The production
//! implementation is [`postgres::PgStore`]; [`memory::MemoryStore`] satisfies
//! the same contracts for tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Note, Project, Task, User};

/// Parses an externally supplied identifier.
///
/// Malformed ids fail with `InvalidInput` before any store call is made.
pub fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidInput(format!("malformed id: {}", id)))
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), AppError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_verification_token(&self, token: &str)
        -> Result<Option<User>, AppError>;
    async fn find_user_by_reset_token(&self, token: &str) -> Result<Option<User>, AppError>;
    /// Full-document replace; the last writer wins.
    async fn update_user(&self, user: &User) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, project: &Project) -> Result<(), AppError>;
    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError>;
    /// All projects in which the user appears as a member.
    async fn find_projects_by_member(&self, user_id: Uuid) -> Result<Vec<Project>, AppError>;
    /// Full-document replace; the last writer wins.
    async fn update_project(&self, project: &Project) -> Result<(), AppError>;
    async fn delete_project(&self, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create_task(&self, task: &Task) -> Result<(), AppError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;
    async fn find_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, AppError>;
    /// Full-document replace; the last writer wins.
    async fn update_task(&self, task: &Task) -> Result<(), AppError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, note: &Note) -> Result<(), AppError>;
    async fn find_note_by_id(&self, id: Uuid) -> Result<Option<Note>, AppError>;
    async fn find_notes_by_project(&self, project_id: Uuid) -> Result<Vec<Note>, AppError>;
    /// Full-document replace; the last writer wins.
    async fn update_note(&self, note: &Note) -> Result<(), AppError>;
    async fn delete_note(&self, id: Uuid) -> Result<(), AppError>;
}
