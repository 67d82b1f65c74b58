use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token;

/// Bearer-token authentication for the protected API surface.
///
/// Validates the access token against the configured access secret and
/// inserts the authenticated user's id into request extensions for the
/// `AuthenticatedUserId` extractor.
pub struct AuthMiddleware {
    access_secret: Rc<String>,
}

impl AuthMiddleware {
    pub fn new(access_secret: impl Into<String>) -> Self {
        Self {
            access_secret: Rc::new(access_secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            access_secret: self.access_secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    access_secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Skip authentication for health check and the public auth endpoints
        let path = req.path();
        if path == "/health"
            || path.starts_with("/api/v1/auth/login")
            || path.starts_with("/api/v1/auth/register")
            || path.starts_with("/api/v1/auth/refresh-token")
            || path.starts_with("/api/v1/auth/verify-email")
            || path.starts_with("/api/v1/auth/forgot-password")
            || path.starts_with("/api/v1/auth/reset-password")
        {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match auth_header {
            Some(bearer) => match token::validate(bearer, &self.access_secret) {
                Ok(user_id) => {
                    req.extensions_mut().insert(user_id);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
            },
            None => {
                let app_err = crate::error::AppError::Unauthorized("Missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
