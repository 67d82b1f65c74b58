use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use projectforge::auth::{AuthService, TokenService};
use projectforge::config::JwtConfig;
use projectforge::email::EmailSender;
use projectforge::error::AppError;
use projectforge::store::memory::MemoryStore;

/// Email sender that records every message instead of delivering it, so
/// tests can pull out the opaque tokens the services issued.
#[derive(Default)]
pub struct RecordingMailer {
    /// `(recipient, token)` pairs for verification emails.
    pub verifications: Mutex<Vec<(String, String)>>,
    /// `(recipient, token)` pairs for password reset emails.
    pub resets: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn last_verification_token(&self) -> Option<String> {
        self.verifications
            .lock()
            .unwrap()
            .last()
            .map(|(_, token)| token.clone())
    }

    pub fn last_reset_token(&self) -> Option<String> {
        self.resets
            .lock()
            .unwrap()
            .last()
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), AppError> {
        self.verifications
            .lock()
            .unwrap()
            .push((to.to_string(), token.to_string()));
        Ok(())
    }

    async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<(), AppError> {
        self.resets
            .lock()
            .unwrap()
            .push((to.to_string(), token.to_string()));
        Ok(())
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_expiry_minutes: 15,
        refresh_expiry_days: 7,
    }
}

/// Auth service wired to an in-memory store and a recording mailer.
pub fn auth_service() -> (AuthService, Arc<MemoryStore>, Arc<RecordingMailer>) {
    let store = Arc::new(MemoryStore::new());
    let mailer = Arc::new(RecordingMailer::default());
    let service = AuthService::new(
        store.clone(),
        mailer.clone(),
        TokenService::new(jwt_config()),
    );
    (service, store, mailer)
}

/// Registers and verifies an account, returning nothing; the caller logs in
/// as needed.
pub async fn register_verified(
    service: &AuthService,
    mailer: &RecordingMailer,
    name: &str,
    email: &str,
    password: &str,
) {
    service.register(name, email, password).await.unwrap();
    let token = mailer.last_verification_token().expect("verification email sent");
    service.verify_email(&token).await.unwrap();
}
