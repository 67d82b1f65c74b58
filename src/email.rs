//! Outbound email. Fire-and-forget from the services' perspective: a send
//! failure is propagated as an error and never retried here.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::SmtpConfig;
use crate::error::AppError;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), AppError>;
    async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<(), AppError>;
}

/// SMTP implementation backed by `lettre`.
pub struct SmtpMailer {
    cfg: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(cfg: SmtpConfig) -> Self {
        Self { cfg }
    }

    fn transport(&self) -> Result<SmtpTransport, AppError> {
        let creds = Credentials::new(self.cfg.username.clone(), self.cfg.password.clone());
        Ok(SmtpTransport::builder_dangerous(&self.cfg.host)
            .port(self.cfg.port)
            .credentials(creds)
            .build())
    }

    fn send(&self, to: &str, subject: &str, body: String) -> Result<(), AppError> {
        let message = Message::builder()
            .from(
                self.cfg
                    .from
                    .parse()
                    .map_err(|_| AppError::InternalServerError("invalid from address".into()))?,
            )
            .to(to
                .parse()
                .map_err(|_| AppError::InvalidInput("invalid recipient address".into()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::InternalServerError(format!("failed to build email: {}", e)))?;

        self.transport()?
            .send(&message)
            .map_err(|e| AppError::InternalServerError(format!("failed to send email: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), AppError> {
        let body = format!(
            "Click the link to verify your email: {}/api/v1/auth/verify-email/{}",
            self.cfg.base_url, token
        );
        self.send(to, "Verify your email", body)
    }

    async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<(), AppError> {
        let body = format!(
            "Click the link to reset your password: {}/api/v1/auth/reset-password/{}",
            self.cfg.base_url, token
        );
        self.send(to, "Reset your password", body)
    }
}
