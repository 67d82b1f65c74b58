use std::sync::Arc;

use uuid::Uuid;

use crate::authz::{has_elevated, is_member};
use crate::error::AppError;
use crate::models::{Project, SubTask, Task, TaskInput, TaskPatch};
use crate::store::{parse_id, ProjectStore, TaskStore};

use super::load_project;

/// Task CRUD, partial updates and sub-task management.
///
/// Members may only transition a task's status and toggle sub-task
/// completion; everything else requires an elevated role.
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    projects: Arc<dyn ProjectStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>, projects: Arc<dyn ProjectStore>) -> Self {
        Self { tasks, projects }
    }

    /// Loads a task, treating a task that does not belong to `project` as
    /// absent so a mismatched project/task id pair leaks nothing.
    async fn load_task_in(&self, project: &Project, task_id: &str) -> Result<Task, AppError> {
        let id = parse_id(task_id)?;
        let task = self
            .tasks
            .find_task_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("task not found".into()))?;
        if task.project_id != project.id {
            return Err(AppError::NotFound("task not found".into()));
        }
        Ok(task)
    }

    pub async fn create_task(
        &self,
        project_id: &str,
        requester_id: Uuid,
        input: TaskInput,
    ) -> Result<Task, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !has_elevated(&project, requester_id) {
            return Err(AppError::Forbidden("requires an elevated role".into()));
        }

        let assigned_to = match input.assigned_to.as_deref() {
            Some(id) => Some(parse_id(id)?),
            None => None,
        };

        let task = Task::new(
            project.id,
            input.title,
            input.description,
            assigned_to,
            requester_id,
        );
        self.tasks.create_task(&task).await?;
        Ok(task)
    }

    pub async fn get_task(
        &self,
        project_id: &str,
        task_id: &str,
        requester_id: Uuid,
    ) -> Result<Task, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !is_member(&project, requester_id) {
            return Err(AppError::Forbidden("not a project member".into()));
        }
        self.load_task_in(&project, task_id).await
    }

    pub async fn list_tasks(
        &self,
        project_id: &str,
        requester_id: Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        if !is_member(&project, requester_id) {
            return Err(AppError::Forbidden("not a project member".into()));
        }
        self.tasks.find_tasks_by_project(project.id).await
    }

    /// Applies a partial update to a task.
    ///
    /// Elevated members may change any field. A plain member may only submit
    /// a patch carrying `status` and nothing else; any other shape is denied.
    pub async fn update_task(
        &self,
        project_id: &str,
        task_id: &str,
        requester_id: Uuid,
        patch: TaskPatch,
    ) -> Result<Task, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let mut task = self.load_task_in(&project, task_id).await?;

        if !has_elevated(&project, requester_id) {
            return match patch.status {
                Some(status) if is_member(&project, requester_id) && patch.is_status_only() => {
                    task.status = status;
                    self.tasks.update_task(&task).await?;
                    Ok(task)
                }
                _ => Err(AppError::Forbidden("requires an elevated role".into())),
            };
        }

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(assigned_to) = patch.assigned_to.as_deref() {
            task.assigned_to = Some(parse_id(assigned_to)?);
        }

        self.tasks.update_task(&task).await?;
        Ok(task)
    }

    pub async fn delete_task(
        &self,
        project_id: &str,
        task_id: &str,
        requester_id: Uuid,
    ) -> Result<(), AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let task = self.load_task_in(&project, task_id).await?;
        if !has_elevated(&project, requester_id) {
            return Err(AppError::Forbidden("requires an elevated role".into()));
        }
        self.tasks.delete_task(task.id).await
    }

    pub async fn create_sub_task(
        &self,
        project_id: &str,
        task_id: &str,
        requester_id: Uuid,
        title: String,
    ) -> Result<Task, AppError> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let mut task = self.load_task_in(&project, task_id).await?;
        if !has_elevated(&project, requester_id) {
            return Err(AppError::Forbidden("requires an elevated role".into()));
        }

        task.sub_tasks.push(SubTask::new(title));
        self.tasks.update_task(&task).await?;
        Ok(task)
    }

    /// Toggles a sub-task's completion flag. Any project member may do this.
    pub async fn update_sub_task(
        &self,
        project_id: &str,
        task_id: &str,
        sub_task_id: &str,
        requester_id: Uuid,
        is_completed: bool,
    ) -> Result<Task, AppError> {
        let sub_task_id = parse_id(sub_task_id)?;
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let mut task = self.load_task_in(&project, task_id).await?;
        if !is_member(&project, requester_id) {
            return Err(AppError::Forbidden("not a project member".into()));
        }

        match task.sub_tasks.iter_mut().find(|st| st.id == sub_task_id) {
            Some(sub_task) => {
                sub_task.is_completed = is_completed;
                self.tasks.update_task(&task).await?;
                Ok(task)
            }
            None => Err(AppError::NotFound("sub-task not found".into())),
        }
    }

    pub async fn delete_sub_task(
        &self,
        project_id: &str,
        task_id: &str,
        sub_task_id: &str,
        requester_id: Uuid,
    ) -> Result<Task, AppError> {
        let sub_task_id = parse_id(sub_task_id)?;
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let mut task = self.load_task_in(&project, task_id).await?;
        if !has_elevated(&project, requester_id) {
            return Err(AppError::Forbidden("requires an elevated role".into()));
        }

        let before = task.sub_tasks.len();
        task.sub_tasks.retain(|st| st.id != sub_task_id);
        if task.sub_tasks.len() == before {
            return Err(AppError::NotFound("sub-task not found".into()));
        }
        self.tasks.update_task(&task).await?;
        Ok(task)
    }
}
