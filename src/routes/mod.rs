pub mod auth;
pub mod health;
pub mod notes;
pub mod projects;
pub mod tasks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::refresh_token)
            .service(auth::verify_email)
            .service(auth::forgot_password)
            .service(auth::reset_password)
            .service(auth::logout)
            .service(auth::current_user)
            .service(auth::change_password)
            .service(auth::resend_email_verification),
    )
    // Task and note scopes are registered before the bare project scope so
    // their longer prefixes match first.
    .service(
        web::scope("/projects/{project_id}/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task)
            .service(tasks::create_sub_task)
            .service(tasks::update_sub_task)
            .service(tasks::delete_sub_task),
    )
    .service(
        web::scope("/projects/{project_id}/notes")
            .service(notes::list_notes)
            .service(notes::create_note)
            .service(notes::get_note)
            .service(notes::update_note)
            .service(notes::delete_note),
    )
    .service(
        web::scope("/projects")
            .service(projects::list_projects)
            .service(projects::create_project)
            .service(projects::get_project)
            .service(projects::update_project)
            .service(projects::delete_project)
            .service(projects::list_members)
            .service(projects::add_member)
            .service(projects::update_member_role)
            .service(projects::remove_member),
    );
}
