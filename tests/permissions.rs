//! Role-based permission tests for the project, task and note services,
//! driven against the in-memory store.
//!
//! Fixture: project P with members { admin: ADMIN, lead: PROJECT_ADMIN,
//! dev: MEMBER } plus an outsider who belongs to no project.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use projectforge::error::AppError;
use projectforge::models::{Project, Role, TaskInput, TaskPatch, TaskStatus, User};
use projectforge::services::{NoteService, ProjectService, TaskService};
use projectforge::store::memory::MemoryStore;
use projectforge::store::UserStore;
use uuid::Uuid;

struct Fixture {
    projects: ProjectService,
    tasks: TaskService,
    notes: NoteService,
    project: Project,
    admin: Uuid,
    lead: Uuid,
    dev: Uuid,
    outsider: Uuid,
}

async fn add_user(store: &MemoryStore, name: &str, email: &str) -> Uuid {
    let mut user = User::new(
        name.to_string(),
        email.to_string(),
        "$2b$12$hash".to_string(),
        format!("token-{}", name),
    );
    user.is_email_verified = true;
    user.verification_token = None;
    store.create_user(&user).await.unwrap();
    user.id
}

async fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let projects = ProjectService::new(store.clone(), store.clone());
    let tasks = TaskService::new(store.clone(), store.clone());
    let notes = NoteService::new(store.clone(), store.clone());

    let admin = add_user(&store, "admin", "admin@example.com").await;
    let lead = add_user(&store, "lead", "lead@example.com").await;
    let dev = add_user(&store, "dev", "dev@example.com").await;
    let outsider = add_user(&store, "outsider", "outsider@example.com").await;

    let project = projects
        .create_project(admin, "Website".to_string(), "Redesign".to_string())
        .await
        .unwrap();
    let project_id = project.id.to_string();
    projects
        .add_member(&project_id, admin, "lead@example.com", Role::ProjectAdmin)
        .await
        .unwrap();
    projects
        .add_member(&project_id, admin, "dev@example.com", Role::Member)
        .await
        .unwrap();
    let project = projects.get_project(&project_id, admin).await.unwrap();

    Fixture {
        projects,
        tasks,
        notes,
        project,
        admin,
        lead,
        dev,
        outsider,
    }
}

fn task_input(title: &str) -> TaskInput {
    TaskInput {
        title: title.to_string(),
        description: String::new(),
        assigned_to: None,
    }
}

#[actix_rt::test]
async fn test_member_may_update_status_only() {
    let f = fixture().await;
    let pid = f.project.id.to_string();
    let task = f.tasks.create_task(&pid, f.admin, task_input("Ship it")).await.unwrap();
    let tid = task.id.to_string();

    // A status-only patch from a plain member succeeds.
    let updated = f
        .tasks
        .update_task(
            &pid,
            &tid,
            f.dev,
            TaskPatch {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);

    // The same member touching the title in the same call is denied.
    let err = f
        .tasks
        .update_task(
            &pid,
            &tid,
            f.dev,
            TaskPatch {
                status: Some(TaskStatus::Done),
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // An admin can change both at once.
    let updated = f
        .tasks
        .update_task(
            &pid,
            &tid,
            f.admin,
            TaskPatch {
                status: Some(TaskStatus::Done),
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(updated.title, "Renamed");
}

#[actix_rt::test]
async fn test_task_creation_and_deletion_require_elevated_role() {
    let f = fixture().await;
    let pid = f.project.id.to_string();

    let err = f.tasks.create_task(&pid, f.dev, task_input("Nope")).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // PROJECT_ADMIN counts as elevated.
    let task = f.tasks.create_task(&pid, f.lead, task_input("Allowed")).await.unwrap();
    let tid = task.id.to_string();

    let err = f.tasks.delete_task(&pid, &tid, f.dev).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    f.tasks.delete_task(&pid, &tid, f.lead).await.unwrap();
}

#[actix_rt::test]
async fn test_sub_task_rules() {
    let f = fixture().await;
    let pid = f.project.id.to_string();
    let task = f.tasks.create_task(&pid, f.admin, task_input("Parent")).await.unwrap();
    let tid = task.id.to_string();

    let err = f
        .tasks
        .create_sub_task(&pid, &tid, f.dev, "Child".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let task = f
        .tasks
        .create_sub_task(&pid, &tid, f.lead, "Child".to_string())
        .await
        .unwrap();
    let sid = task.sub_tasks[0].id.to_string();

    // Any member may toggle completion.
    let task = f
        .tasks
        .update_sub_task(&pid, &tid, &sid, f.dev, true)
        .await
        .unwrap();
    assert!(task.sub_tasks[0].is_completed);

    let err = f
        .tasks
        .update_sub_task(&pid, &tid, &sid, f.outsider, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Deleting a sub-task is elevated-only.
    let err = f.tasks.delete_sub_task(&pid, &tid, &sid, f.dev).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let task = f.tasks.delete_sub_task(&pid, &tid, &sid, f.admin).await.unwrap();
    assert!(task.sub_tasks.is_empty());

    let err = f
        .tasks
        .update_sub_task(&pid, &tid, &sid, f.dev, false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn test_mismatched_project_task_pair_is_not_found() {
    let f = fixture().await;
    let pid = f.project.id.to_string();
    let task = f.tasks.create_task(&pid, f.admin, task_input("In P1")).await.unwrap();

    // A second project owned by the same admin.
    let other = f
        .projects
        .create_project(f.admin, "Other".to_string(), String::new())
        .await
        .unwrap();

    // The task exists, but not under the project named in the path; report
    // absence rather than leaking it.
    let err = f
        .tasks
        .get_task(&other.id.to_string(), &task.id.to_string(), f.admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn test_reads_require_membership() {
    let f = fixture().await;
    let pid = f.project.id.to_string();

    for user in [f.admin, f.lead, f.dev] {
        f.projects.get_project(&pid, user).await.unwrap();
        f.tasks.list_tasks(&pid, user).await.unwrap();
        f.notes.list_notes(&pid, user).await.unwrap();
        f.projects.list_members(&pid, user).await.unwrap();
    }

    assert!(matches!(
        f.projects.get_project(&pid, f.outsider).await.unwrap_err(),
        AppError::Forbidden(_)
    ));
    assert!(matches!(
        f.tasks.list_tasks(&pid, f.outsider).await.unwrap_err(),
        AppError::Forbidden(_)
    ));
    assert!(matches!(
        f.projects.list_members(&pid, f.outsider).await.unwrap_err(),
        AppError::Forbidden(_)
    ));
}

#[actix_rt::test]
async fn test_project_edit_and_delete_are_admin_only() {
    let f = fixture().await;
    let pid = f.project.id.to_string();

    // PROJECT_ADMIN manages tasks, not the project itself.
    let err = f
        .projects
        .update_project(&pid, f.lead, "X".to_string(), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let project = f
        .projects
        .update_project(&pid, f.admin, "Website v2".to_string(), String::new())
        .await
        .unwrap();
    assert_eq!(project.name, "Website v2");

    let err = f.projects.delete_project(&pid, f.lead).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    f.projects.delete_project(&pid, f.admin).await.unwrap();
}

#[actix_rt::test]
async fn test_membership_management_is_admin_only() {
    let f = fixture().await;
    let pid = f.project.id.to_string();

    let err = f
        .projects
        .add_member(&pid, f.lead, "outsider@example.com", Role::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    f.projects
        .add_member(&pid, f.admin, "outsider@example.com", Role::Member)
        .await
        .unwrap();

    // Adding the same user twice conflicts.
    let err = f
        .projects
        .add_member(&pid, f.admin, "outsider@example.com", Role::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Unknown email is a plain not-found.
    let err = f
        .projects
        .add_member(&pid, f.admin, "ghost@example.com", Role::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    f.projects
        .update_member_role(&pid, f.admin, &f.outsider.to_string(), Role::ProjectAdmin)
        .await
        .unwrap();
    f.projects
        .remove_member(&pid, f.admin, &f.outsider.to_string())
        .await
        .unwrap();

    let err = f
        .projects
        .remove_member(&pid, f.admin, &Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn test_note_mutations_require_elevated_role() {
    let f = fixture().await;
    let pid = f.project.id.to_string();

    let err = f
        .notes
        .create_note(&pid, f.dev, "N".to_string(), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let note = f
        .notes
        .create_note(&pid, f.lead, "Minutes".to_string(), "...".to_string())
        .await
        .unwrap();
    let nid = note.id.to_string();

    // Members read but do not mutate.
    f.notes.get_note(&pid, &nid, f.dev).await.unwrap();
    let err = f
        .notes
        .update_note(&pid, &nid, f.dev, "X".to_string(), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = f.notes.delete_note(&pid, &nid, f.dev).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    f.notes
        .update_note(&pid, &nid, f.admin, "Minutes v2".to_string(), String::new())
        .await
        .unwrap();
    f.notes.delete_note(&pid, &nid, f.admin).await.unwrap();
}

#[actix_rt::test]
async fn test_malformed_ids_are_rejected_before_the_store() {
    let f = fixture().await;

    assert!(matches!(
        f.projects.get_project("not-a-uuid", f.admin).await.unwrap_err(),
        AppError::InvalidInput(_)
    ));
    assert!(matches!(
        f.tasks
            .get_task(&f.project.id.to_string(), "not-a-uuid", f.admin)
            .await
            .unwrap_err(),
        AppError::InvalidInput(_)
    ));

    // Unknown but well-formed project ids are a plain not-found.
    assert!(matches!(
        f.projects
            .get_project(&Uuid::new_v4().to_string(), f.admin)
            .await
            .unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[actix_rt::test]
async fn test_creator_is_admin_of_new_project() {
    let f = fixture().await;
    let project = f
        .projects
        .create_project(f.dev, "Dev's own".to_string(), String::new())
        .await
        .unwrap();

    // dev is only MEMBER in the fixture project, but ADMIN of the one they
    // created; roles do not leak across projects.
    let members = f
        .projects
        .list_members(&project.id.to_string(), f.dev)
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, f.dev);
    assert_eq!(members[0].role, Role::Admin);

    let err = f
        .projects
        .update_project(&f.project.id.to_string(), f.dev, "X".to_string(), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
