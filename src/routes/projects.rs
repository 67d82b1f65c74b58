use crate::{
    auth::extractors::AuthenticatedUserId,
    error::AppError,
    models::{AddMemberRequest, ProjectInput, UpdateMemberRoleRequest},
    services::ProjectService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Lists the projects the authenticated user is a member of.
#[get("")]
pub async fn list_projects(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let projects = service.list_projects(user.0).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[post("")]
pub async fn create_project(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
    input: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let input = input.into_inner();
    let project = service
        .create_project(user.0, input.name, input.description)
        .await?;
    Ok(HttpResponse::Created().json(project))
}

#[get("/{project_id}")]
pub async fn get_project(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let project = service.get_project(&path.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[put("/{project_id}")]
pub async fn update_project(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
    input: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let input = input.into_inner();
    let project = service
        .update_project(&path.into_inner(), user.0, input.name, input.description)
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

#[delete("/{project_id}")]
pub async fn delete_project(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    service.delete_project(&path.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "project deleted successfully" })))
}

#[get("/{project_id}/members")]
pub async fn list_members(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let members = service.list_members(&path.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(members))
}

#[post("/{project_id}/members")]
pub async fn add_member(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
    body: web::Json<AddMemberRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    service
        .add_member(&path.into_inner(), user.0, &body.email, body.role)
        .await?;
    Ok(HttpResponse::Created().json(json!({ "message": "member added successfully" })))
}

#[put("/{project_id}/members/{user_id}")]
pub async fn update_member_role(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
    body: web::Json<UpdateMemberRoleRequest>,
) -> Result<impl Responder, AppError> {
    let (project_id, target_user_id) = path.into_inner();
    service
        .update_member_role(&project_id, user.0, &target_user_id, body.role)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "member role updated successfully" })))
}

#[delete("/{project_id}/members/{user_id}")]
pub async fn remove_member(
    service: web::Data<ProjectService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, AppError> {
    let (project_id, target_user_id) = path.into_inner();
    service
        .remove_member(&project_id, user.0, &target_user_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "member removed successfully" })))
}
