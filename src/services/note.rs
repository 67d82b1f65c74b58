use std::sync::Arc;

use uuid::Uuid;

use crate::authz::{has_elevated, is_member};
use crate::error::AppError;
use crate::models::{Note, Project};
use crate::store::{parse_id, NoteStore, ProjectStore};

use super::load_project;

/// Note CRUD. Reads are open to all project members; mutations require an
/// elevated role.
pub struct NoteService {
    notes: Arc<dyn NoteStore>,
    projects: Arc<dyn ProjectStore>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteStore>, projects: Arc<dyn ProjectStore>) -> Self {
        Self { notes, projects }
    }

    async fn load_note_in(&self, project: &Project, note_id: &str) -> Result<Note, AppError> {
        let id = parse_id(note_id)?;
        let note = self
            .notes
            .find_note_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("note not found".into()))?;
        if note.project_id != project.id {
            return Err(AppError::NotFound("note not found".into()));
        }
        Ok(note)
    }

    pub async fn create_note(
        &self,
        project_id: &str,
        requester_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Note, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !has_elevated(&project, requester_id) {
            return Err(AppError::Forbidden("requires an elevated role".into()));
        }

        let note = Note::new(project.id, title, content, requester_id);
        self.notes.create_note(&note).await?;
        Ok(note)
    }

    pub async fn get_note(
        &self,
        project_id: &str,
        note_id: &str,
        requester_id: Uuid,
    ) -> Result<Note, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !is_member(&project, requester_id) {
            return Err(AppError::Forbidden("not a project member".into()));
        }
        self.load_note_in(&project, note_id).await
    }

    pub async fn list_notes(
        &self,
        project_id: &str,
        requester_id: Uuid,
    ) -> Result<Vec<Note>, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !is_member(&project, requester_id) {
            return Err(AppError::Forbidden("not a project member".into()));
        }
        self.notes.find_notes_by_project(project.id).await
    }

    pub async fn update_note(
        &self,
        project_id: &str,
        note_id: &str,
        requester_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Note, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let mut note = self.load_note_in(&project, note_id).await?;
        if !has_elevated(&project, requester_id) {
            return Err(AppError::Forbidden("requires an elevated role".into()));
        }

        note.title = title;
        note.content = content;
        self.notes.update_note(&note).await?;
        Ok(note)
    }

    pub async fn delete_note(
        &self,
        project_id: &str,
        note_id: &str,
        requester_id: Uuid,
    ) -> Result<(), AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let note = self.load_note_in(&project, note_id).await?;
        if !has_elevated(&project, requester_id) {
            return Err(AppError::Forbidden("requires an elevated role".into()));
        }
        self.notes.delete_note(note.id).await
    }
}
