pub mod extractors;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use token::{issue_opaque_token, Claims, TokenService};

lazy_static! {
    // Regex for display-name validation: letters, digits, spaces and common punctuation
    static ref NAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9 .'_-]+$").unwrap();
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[validate(
        length(min = 1, max = 100),
        regex(
            path = "NAME_REGEX",
            message = "Name contains unsupported characters"
        )
    )]
    pub name: String,
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account. Must be at least 8 characters long.
    #[validate(length(min = 8))]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response structure after successful login: the signed token pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Payload for exchanging a refresh token for a new access token.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_email = RegisterRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada-example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email.validate().is_err());

        let short_password = RegisterRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());

        let bad_name = RegisterRequest {
            name: "Ada <script>".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(bad_name.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let empty_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password_login.validate().is_err());
    }
}
