use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{issue_opaque_token, TokenService};
use crate::email::EmailSender;
use crate::error::AppError;
use crate::models::User;
use crate::store::UserStore;

/// Reset tokens are honored for one hour after issuance.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Orchestrates the account lifecycle: registration, verification, login,
/// session refresh and the password flows.
///
/// Composes the token service, the credential store and the email sender;
/// holds no mutable state of its own.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    email: Arc<dyn EmailSender>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, email: Arc<dyn EmailSender>, tokens: TokenService) -> Self {
        Self { users, email, tokens }
    }

    /// Creates an unverified account and sends the verification email.
    ///
    /// The user record is persisted before the email is sent; a send failure
    /// surfaces as an error but does not roll the record back.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AppError> {
        if self.users.find_user_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("email already registered".into()));
        }

        let password_hash = hash_password(password)?;
        let verification_token = issue_opaque_token();

        let user = User::new(
            name.to_string(),
            email.to_string(),
            password_hash,
            verification_token.clone(),
        );
        self.users.create_user(&user).await?;
        log::debug!("registered user {}", user.id);

        self.email
            .send_verification_email(email, &verification_token)
            .await
    }

    /// Authenticates a verified user and opens a session.
    ///
    /// Returns `(access_token, refresh_token)`. The new refresh token is
    /// persisted on the user record, invalidating any previously issued one.
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, String), AppError> {
        let mut user = self
            .users
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".into()))?;

        if !user.is_email_verified {
            return Err(AppError::EmailNotVerified);
        }

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized("invalid credentials".into()));
        }

        let access_token = self.tokens.issue_access_token(user.id)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        user.refresh_token = Some(refresh_token.clone());
        self.users.update_user(&user).await?;

        Ok((access_token, refresh_token))
    }

    /// Clears the stored refresh token; every outstanding refresh token for
    /// this user becomes unusable immediately.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".into()))?;

        user.refresh_token = None;
        self.users.update_user(&user).await
    }

    /// Marks the account verified and consumes the verification token.
    pub async fn verify_email(&self, token: &str) -> Result<(), AppError> {
        let mut user = self
            .users
            .find_user_by_verification_token(token)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        user.is_email_verified = true;
        user.verification_token = None;
        self.users.update_user(&user).await
    }

    /// Mints a new access token from a refresh token.
    ///
    /// The token must be signature-valid under the refresh secret AND equal
    /// to the single value stored on the user record. The refresh token is
    /// not rotated by this operation.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<String, AppError> {
        let user_id = self.tokens.validate_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".into()))?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AppError::TokenInvalid);
        }

        self.tokens.issue_access_token(user_id)
    }

    /// Replaces the password after checking the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let mut user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".into()))?;

        if !verify_password(old_password, &user.password_hash)? {
            return Err(AppError::Unauthorized("invalid credentials".into()));
        }

        user.password_hash = hash_password(new_password)?;
        self.users.update_user(&user).await
    }

    /// Issues a reset token and emails it to the account, if one exists.
    ///
    /// An unknown email returns success with no observable effect, so callers
    /// cannot probe which addresses are registered.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let mut user = match self.users.find_user_by_email(email).await? {
            Some(user) => user,
            None => return Ok(()),
        };

        let reset_token = issue_opaque_token();
        user.reset_token = Some(reset_token.clone());
        user.reset_token_expiry = Some(Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS));
        self.users.update_user(&user).await?;

        self.email.send_password_reset_email(email, &reset_token).await
    }

    /// Replaces the password via a reset token and consumes the token.
    ///
    /// Expiry is checked against the stored timestamp, not the token string,
    /// so an exact string match can still fail with `TokenExpired`.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let mut user = self
            .users
            .find_user_by_reset_token(token)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        match user.reset_token_expiry {
            Some(expiry) if Utc::now() <= expiry => {}
            _ => return Err(AppError::TokenExpired),
        }

        user.password_hash = hash_password(new_password)?;
        user.reset_token = None;
        user.reset_token_expiry = None;
        self.users.update_user(&user).await
    }

    /// Reissues the verification token and resends the email.
    pub async fn resend_verification_email(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".into()))?;

        if user.is_email_verified {
            return Err(AppError::Conflict("email already verified".into()));
        }

        let verification_token = issue_opaque_token();
        user.verification_token = Some(verification_token.clone());
        self.users.update_user(&user).await?;

        self.email
            .send_verification_email(&user.email, &verification_token)
            .await
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".into()))
    }
}
