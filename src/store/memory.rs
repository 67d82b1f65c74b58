//! In-memory store used by the integration tests.
//!
//! Implements the same capability traits as the Postgres store over plain
//! hash maps. Each method takes the lock for the duration of one
//! read-modify-write, mirroring the per-document atomicity the production
//! store provides.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Note, Project, Task, User};

use super::{NoteStore, ProjectStore, TaskStore, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    projects: RwLock<HashMap<Uuid, Project>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
    notes: RwLock<HashMap<Uuid, Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().unwrap();
        // Mirrors the unique index on users.email.
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("email already registered".into()));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_user_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.verification_token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_user_by_reset_token(&self, token: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.reset_token.as_deref() == Some(token))
            .cloned())
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        let mut user = user.clone();
        user.updated_at = chrono::Utc::now();
        self.users.write().unwrap().insert(user.id, user);
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, project: &Project) -> Result<(), AppError> {
        self.projects
            .write()
            .unwrap()
            .insert(project.id, project.clone());
        Ok(())
    }

    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        Ok(self.projects.read().unwrap().get(&id).cloned())
    }

    async fn find_projects_by_member(&self, user_id: Uuid) -> Result<Vec<Project>, AppError> {
        Ok(self
            .projects
            .read()
            .unwrap()
            .values()
            .filter(|p| p.members.iter().any(|m| m.user_id == user_id))
            .cloned()
            .collect())
    }

    async fn update_project(&self, project: &Project) -> Result<(), AppError> {
        let mut project = project.clone();
        project.updated_at = chrono::Utc::now();
        self.projects.write().unwrap().insert(project.id, project);
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), AppError> {
        self.projects.write().unwrap().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, task: &Task) -> Result<(), AppError> {
        self.tasks.write().unwrap().insert(task.id, task.clone());
        Ok(())
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.tasks.read().unwrap().get(&id).cloned())
    }

    async fn find_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, AppError> {
        Ok(self
            .tasks
            .read()
            .unwrap()
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update_task(&self, task: &Task) -> Result<(), AppError> {
        let mut task = task.clone();
        task.updated_at = chrono::Utc::now();
        self.tasks.write().unwrap().insert(task.id, task);
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), AppError> {
        self.tasks.write().unwrap().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, note: &Note) -> Result<(), AppError> {
        self.notes.write().unwrap().insert(note.id, note.clone());
        Ok(())
    }

    async fn find_note_by_id(&self, id: Uuid) -> Result<Option<Note>, AppError> {
        Ok(self.notes.read().unwrap().get(&id).cloned())
    }

    async fn find_notes_by_project(&self, project_id: Uuid) -> Result<Vec<Note>, AppError> {
        Ok(self
            .notes
            .read()
            .unwrap()
            .values()
            .filter(|n| n.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update_note(&self, note: &Note) -> Result<(), AppError> {
        let mut note = note.clone();
        note.updated_at = chrono::Utc::now();
        self.notes.write().unwrap().insert(note.id, note);
        Ok(())
    }

    async fn delete_note(&self, id: Uuid) -> Result<(), AppError> {
        self.notes.write().unwrap().remove(&id);
        Ok(())
    }
}
