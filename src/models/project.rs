use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user::Role;

/// A single entry in a project's member list.
///
/// A user id appears at most once per project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectMember {
    pub user_id: Uuid,
    pub role: Role,
}

/// A project with its member list.
///
/// Every project has at least one ADMIN member from creation (the creator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub members: Vec<ProjectMember>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project whose creator is its sole ADMIN member.
    pub fn new(name: String, description: String, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            members: vec![ProjectMember {
                user_id: created_by,
                role: Role::Admin,
            }],
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input structure for creating or updating a project.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
}

/// Payload for adding a member to a project, addressed by email.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(email)]
    pub email: String,
    pub role: Role,
}

/// Payload for changing an existing member's role.
#[derive(Debug, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_creator_is_admin() {
        let creator = Uuid::new_v4();
        let project = Project::new("Website".to_string(), "Redesign".to_string(), creator);

        assert_eq!(project.members.len(), 1);
        assert_eq!(project.members[0].user_id, creator);
        assert_eq!(project.members[0].role, Role::Admin);
        assert_eq!(project.created_by, creator);
    }

    #[test]
    fn test_project_input_validation() {
        let input = ProjectInput {
            name: "Website".to_string(),
            description: "Redesign".to_string(),
        };
        assert!(input.validate().is_ok());

        let input = ProjectInput {
            name: "".to_string(),
            description: "Redesign".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
