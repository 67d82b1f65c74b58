//! Resource services: each mutation loads the owning project's membership,
//! consults the authorization engine, then mutates through the store.

pub mod note;
pub mod project;
pub mod task;

pub use note::NoteService;
pub use project::ProjectService;
pub use task::TaskService;

use crate::error::AppError;
use crate::models::Project;
use crate::store::{parse_id, ProjectStore};

/// Resolves a project from an externally supplied id.
pub(crate) async fn load_project(
    projects: &dyn ProjectStore,
    project_id: &str,
) -> Result<Project, AppError> {
    let id = parse_id(project_id)?;
    projects
        .find_project_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("project not found".into()))
}
