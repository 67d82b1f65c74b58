//! Project-scoped authorization decisions.
//!
//! Pure functions over a project's member list; no I/O. Resource services
//! load the owning project and consult these before mutating anything.

use uuid::Uuid;

use crate::models::{Project, Role};

/// True when `user_id` appears in the project's member list, regardless of role.
pub fn is_member(project: &Project, user_id: Uuid) -> bool {
    project.members.iter().any(|m| m.user_id == user_id)
}

/// True when `user_id` holds exactly `role` in the project.
pub fn has_role(project: &Project, user_id: Uuid, role: Role) -> bool {
    project
        .members
        .iter()
        .any(|m| m.user_id == user_id && m.role == role)
}

/// True when `user_id` holds an elevated role (ADMIN or PROJECT_ADMIN).
pub fn has_elevated(project: &Project, user_id: Uuid) -> bool {
    project.members.iter().any(|m| {
        m.user_id == user_id && (m.role == Role::Admin || m.role == Role::ProjectAdmin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectMember;

    fn project_with(members: Vec<(Uuid, Role)>) -> Project {
        let creator = members[0].0;
        let mut project = Project::new("P".to_string(), String::new(), creator);
        project.members = members
            .into_iter()
            .map(|(user_id, role)| ProjectMember { user_id, role })
            .collect();
        project
    }

    #[test]
    fn test_is_member_for_every_role() {
        let admin = Uuid::new_v4();
        let project_admin = Uuid::new_v4();
        let member = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let project = project_with(vec![
            (admin, Role::Admin),
            (project_admin, Role::ProjectAdmin),
            (member, Role::Member),
        ]);

        assert!(is_member(&project, admin));
        assert!(is_member(&project, project_admin));
        assert!(is_member(&project, member));
        assert!(!is_member(&project, outsider));
    }

    #[test]
    fn test_has_role_is_exact_match() {
        let admin = Uuid::new_v4();
        let member = Uuid::new_v4();
        let project = project_with(vec![(admin, Role::Admin), (member, Role::Member)]);

        assert!(has_role(&project, admin, Role::Admin));
        assert!(!has_role(&project, admin, Role::Member));
        assert!(!has_role(&project, member, Role::Admin));
        assert!(has_role(&project, member, Role::Member));
    }

    #[test]
    fn test_has_elevated() {
        let admin = Uuid::new_v4();
        let project_admin = Uuid::new_v4();
        let member = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let project = project_with(vec![
            (admin, Role::Admin),
            (project_admin, Role::ProjectAdmin),
            (member, Role::Member),
        ]);

        assert!(has_elevated(&project, admin));
        assert!(has_elevated(&project, project_admin));
        assert!(!has_elevated(&project, member));
        assert!(!has_elevated(&project, outsider));
    }
}
