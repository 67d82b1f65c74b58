use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A free-form note attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(project_id: Uuid, title: String, content: String, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            title,
            content,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input structure for creating or updating a note.
#[derive(Debug, Deserialize, Validate)]
pub struct NoteInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_input_validation() {
        let input = NoteInput {
            title: "Meeting notes".to_string(),
            content: "Discussed the roadmap".to_string(),
        };
        assert!(input.validate().is_ok());

        let input = NoteInput {
            title: "".to_string(),
            content: "Discussed the roadmap".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
