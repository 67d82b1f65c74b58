use crate::{
    auth::{
        extractors::AuthenticatedUserId, AuthService, AuthTokens, ChangePasswordRequest,
        ForgotPasswordRequest, LoginRequest, RefreshRequest, RegisterRequest,
        ResetPasswordRequest,
    },
    error::AppError,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Register a new user
///
/// Creates an unverified account and sends a verification email.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    service
        .register(
            &register_data.name,
            &register_data.email,
            &register_data.password,
        )
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "registration successful, please verify your email"
    })))
}

/// Login user
///
/// Authenticates a verified user and returns an access/refresh token pair.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let (access_token, refresh) = service
        .login(&login_data.email, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthTokens {
        access_token,
        refresh_token: refresh,
    }))
}

/// Exchanges a refresh token for a new access token.
#[post("/refresh-token")]
pub async fn refresh_token(
    service: web::Data<AuthService>,
    body: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    let access_token = service.refresh_token(&body.refresh_token).await?;
    Ok(HttpResponse::Ok().json(json!({ "access_token": access_token })))
}

#[get("/verify-email/{token}")]
pub async fn verify_email(
    service: web::Data<AuthService>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    service.verify_email(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "email verified successfully" })))
}

/// Starts the password-reset flow.
///
/// Always answers 200 so callers cannot probe which emails are registered.
#[post("/forgot-password")]
pub async fn forgot_password(
    service: web::Data<AuthService>,
    body: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    service.forgot_password(&body.email).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "if the email exists, a reset link has been sent"
    })))
}

#[post("/reset-password/{token}")]
pub async fn reset_password(
    service: web::Data<AuthService>,
    path: web::Path<String>,
    body: web::Json<ResetPasswordRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    service
        .reset_password(&path.into_inner(), &body.password)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "password reset successfully" })))
}

#[post("/logout")]
pub async fn logout(
    service: web::Data<AuthService>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    service.logout(user.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "logged out successfully" })))
}

#[get("/current-user")]
pub async fn current_user(
    service: web::Data<AuthService>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let user = service.current_user(user.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/change-password")]
pub async fn change_password(
    service: web::Data<AuthService>,
    user: AuthenticatedUserId,
    body: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    service
        .change_password(user.0, &body.old_password, &body.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "password changed successfully" })))
}

#[post("/resend-email-verification")]
pub async fn resend_email_verification(
    service: web::Data<AuthService>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    service.resend_verification_email(user.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "verification email sent" })))
}
