use crate::{
    auth::extractors::AuthenticatedUserId,
    error::AppError,
    models::{SubTaskInput, SubTaskPatch, TaskInput, TaskPatch},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

// Mounted under /projects/{project_id}/tasks; every operation carries the
// owning project in the path so mismatched ids resolve to 404.

#[get("")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let tasks = service.list_tasks(&path.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
    input: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let task = service
        .create_task(&path.into_inner(), user.0, input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(task))
}

#[get("/{task_id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, AppError> {
    let (project_id, task_id) = path.into_inner();
    let task = service.get_task(&project_id, &task_id, user.0).await?;
    Ok(HttpResponse::Ok().json(task))
}

#[put("/{task_id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
    patch: web::Json<TaskPatch>,
) -> Result<impl Responder, AppError> {
    patch.validate()?;
    let (project_id, task_id) = path.into_inner();
    let task = service
        .update_task(&project_id, &task_id, user.0, patch.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/{task_id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, AppError> {
    let (project_id, task_id) = path.into_inner();
    service.delete_task(&project_id, &task_id, user.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "task deleted successfully" })))
}

#[post("/{task_id}/subtasks")]
pub async fn create_sub_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
    input: web::Json<SubTaskInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let (project_id, task_id) = path.into_inner();
    let task = service
        .create_sub_task(&project_id, &task_id, user.0, input.into_inner().title)
        .await?;
    Ok(HttpResponse::Created().json(task))
}

#[put("/{task_id}/subtasks/{sub_task_id}")]
pub async fn update_sub_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String, String)>,
    body: web::Json<SubTaskPatch>,
) -> Result<impl Responder, AppError> {
    let (project_id, task_id, sub_task_id) = path.into_inner();
    let task = service
        .update_sub_task(&project_id, &task_id, &sub_task_id, user.0, body.is_completed)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/{task_id}/subtasks/{sub_task_id}")]
pub async fn delete_sub_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String, String)>,
) -> Result<impl Responder, AppError> {
    let (project_id, task_id, sub_task_id) = path.into_inner();
    let task = service
        .delete_sub_task(&project_id, &task_id, &sub_task_id, user.0)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}
