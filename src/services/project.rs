use std::sync::Arc;

use uuid::Uuid;

use crate::authz::{has_role, is_member};
use crate::error::AppError;
use crate::models::{Project, ProjectMember, Role};
use crate::store::{parse_id, ProjectStore, UserStore};

use super::load_project;

/// Project CRUD and membership management.
///
/// Membership changes require the ADMIN role in the target project.
pub struct ProjectService {
    projects: Arc<dyn ProjectStore>,
    users: Arc<dyn UserStore>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectStore>, users: Arc<dyn UserStore>) -> Self {
        Self { projects, users }
    }

    /// Creates a project; the creator becomes its sole ADMIN member.
    pub async fn create_project(
        &self,
        user_id: Uuid,
        name: String,
        description: String,
    ) -> Result<Project, AppError> {
        let project = Project::new(name, description, user_id);
        self.projects.create_project(&project).await?;
        Ok(project)
    }

    pub async fn get_project(&self, project_id: &str, user_id: Uuid) -> Result<Project, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !is_member(&project, user_id) {
            return Err(AppError::Forbidden("not a project member".into()));
        }
        Ok(project)
    }

    pub async fn list_projects(&self, user_id: Uuid) -> Result<Vec<Project>, AppError> {
        self.projects.find_projects_by_member(user_id).await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        user_id: Uuid,
        name: String,
        description: String,
    ) -> Result<Project, AppError> {
        let mut project = load_project(self.projects.as_ref(), project_id).await?;
        if !has_role(&project, user_id, Role::Admin) {
            return Err(AppError::Forbidden("requires project admin".into()));
        }

        project.name = name;
        project.description = description;
        self.projects.update_project(&project).await?;
        Ok(project)
    }

    pub async fn delete_project(&self, project_id: &str, user_id: Uuid) -> Result<(), AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !has_role(&project, user_id, Role::Admin) {
            return Err(AppError::Forbidden("requires project admin".into()));
        }
        self.projects.delete_project(project.id).await
    }

    /// Adds a user to the project's member list, addressed by email.
    pub async fn add_member(
        &self,
        project_id: &str,
        requester_id: Uuid,
        email: &str,
        role: Role,
    ) -> Result<(), AppError> {
        let mut project = load_project(self.projects.as_ref(), project_id).await?;
        if !has_role(&project, requester_id, Role::Admin) {
            return Err(AppError::Forbidden("requires project admin".into()));
        }

        let user = self
            .users
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("user with email not found".into()))?;

        if project.members.iter().any(|m| m.user_id == user.id) {
            return Err(AppError::Conflict("user is already a member".into()));
        }

        project.members.push(ProjectMember {
            user_id: user.id,
            role,
        });
        self.projects.update_project(&project).await
    }

    pub async fn list_members(
        &self,
        project_id: &str,
        requester_id: Uuid,
    ) -> Result<Vec<ProjectMember>, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !is_member(&project, requester_id) {
            return Err(AppError::Forbidden("not a project member".into()));
        }
        Ok(project.members)
    }

    pub async fn update_member_role(
        &self,
        project_id: &str,
        requester_id: Uuid,
        target_user_id: &str,
        role: Role,
    ) -> Result<(), AppError> {
        let target = parse_id(target_user_id)?;
        let mut project = load_project(self.projects.as_ref(), project_id).await?;
        if !has_role(&project, requester_id, Role::Admin) {
            return Err(AppError::Forbidden("requires project admin".into()));
        }

        match project.members.iter_mut().find(|m| m.user_id == target) {
            Some(member) => {
                member.role = role;
                self.projects.update_project(&project).await
            }
            None => Err(AppError::NotFound("member not found".into())),
        }
    }

    pub async fn remove_member(
        &self,
        project_id: &str,
        requester_id: Uuid,
        target_user_id: &str,
    ) -> Result<(), AppError> {
        let target = parse_id(target_user_id)?;
        let mut project = load_project(self.projects.as_ref(), project_id).await?;
        if !has_role(&project, requester_id, Role::Admin) {
            return Err(AppError::Forbidden("requires project admin".into()));
        }

        let before = project.members.len();
        project.members.retain(|m| m.user_id != target);
        if project.members.len() == before {
            return Err(AppError::NotFound("member not found".into()));
        }
        self.projects.update_project(&project).await
    }
}
