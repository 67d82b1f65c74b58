use crate::config::JwtConfig;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: String,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Issues and validates the two signed token families.
///
/// Access and refresh tokens are stateless HS256 JWTs signed with separate
/// secrets, so neither secret can forge the other family. The service holds
/// its configuration explicitly; there is no ambient global state.
#[derive(Clone)]
pub struct TokenService {
    cfg: JwtConfig,
}

impl TokenService {
    pub fn new(cfg: JwtConfig) -> Self {
        Self { cfg }
    }

    /// Generates a short-lived access token for the given user.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, AppError> {
        sign(
            user_id,
            &self.cfg.access_secret,
            Duration::minutes(self.cfg.access_expiry_minutes),
        )
    }

    /// Generates a refresh token for the given user.
    ///
    /// The caller is expected to persist the returned value on the user
    /// record; validity additionally requires equality with that stored copy.
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, AppError> {
        sign(
            user_id,
            &self.cfg.refresh_secret,
            Duration::days(self.cfg.refresh_expiry_days),
        )
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, AppError> {
        validate(token, &self.cfg.access_secret)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Uuid, AppError> {
        validate(token, &self.cfg.refresh_secret)
    }
}

fn sign(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::InternalServerError("token expiry out of range".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string against `secret` and returns its subject.
///
/// Validation is pinned to HS256, so a token carrying any other algorithm is
/// rejected. Malformed tokens, bad signatures and library-level expiry all
/// yield the same `TokenInvalid` outcome.
pub fn validate(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::TokenInvalid)?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::TokenInvalid)
}

/// Generates an opaque single-use token: 32 CSPRNG bytes, hex-encoded.
///
/// Used for email verification and password reset; validated by store lookup
/// rather than signature.
pub fn issue_opaque_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
