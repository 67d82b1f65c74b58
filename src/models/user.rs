use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role held by a user within a project's member list.
///
/// Roles are scoped per-project; the same user may hold different roles in
/// different projects. The `role` field on [`User`] is a reserved global role
/// and plays no part in project-scoped authorization decisions.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full control of the project, its membership and its resources.
    Admin,
    /// Manages tasks and notes, but not project membership.
    ProjectAdmin,
    /// Read access plus restricted task updates.
    Member,
}

/// A user account as stored in the credential store.
///
/// Credential material (password hash, verification/reset/refresh tokens) is
/// never serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Reserved global role; project authorization uses per-project roles.
    pub role: Role,
    pub is_email_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token_expiry: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user carrying a pending verification token.
    pub fn new(name: String, email: String, password_hash: String, verification_token: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role: Role::Member,
            is_email_verified: false,
            verification_token: Some(verification_token),
            reset_token: None,
            reset_token_expiry: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}
