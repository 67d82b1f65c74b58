use crate::{
    auth::extractors::AuthenticatedUserId, error::AppError, models::NoteInput,
    services::NoteService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

// Mounted under /projects/{project_id}/notes.

#[get("")]
pub async fn list_notes(
    service: web::Data<NoteService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let notes = service.list_notes(&path.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(notes))
}

#[post("")]
pub async fn create_note(
    service: web::Data<NoteService>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
    input: web::Json<NoteInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let input = input.into_inner();
    let note = service
        .create_note(&path.into_inner(), user.0, input.title, input.content)
        .await?;
    Ok(HttpResponse::Created().json(note))
}

#[get("/{note_id}")]
pub async fn get_note(
    service: web::Data<NoteService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, AppError> {
    let (project_id, note_id) = path.into_inner();
    let note = service.get_note(&project_id, &note_id, user.0).await?;
    Ok(HttpResponse::Ok().json(note))
}

#[put("/{note_id}")]
pub async fn update_note(
    service: web::Data<NoteService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
    input: web::Json<NoteInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let (project_id, note_id) = path.into_inner();
    let input = input.into_inner();
    let note = service
        .update_note(&project_id, &note_id, user.0, input.title, input.content)
        .await?;
    Ok(HttpResponse::Ok().json(note))
}

#[delete("/{note_id}")]
pub async fn delete_note(
    service: web::Data<NoteService>,
    user: AuthenticatedUserId,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, AppError> {
    let (project_id, note_id) = path.into_inner();
    service.delete_note(&project_id, &note_id, user.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "note deleted successfully" })))
}
