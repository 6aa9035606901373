//! The per-request authentication gate.
//!
//! Wrapped around the `/api` scope, this middleware runs once before routing:
//! it turns a bearer token into an attached principal, then consults the
//! admission table. The gate itself never rejects a request for a bad token:
//! an invalid or stale token simply leaves the request unauthenticated, and
//! the admission decision (pass, 401, 403) is made by the policy. This keeps
//! public routes reachable even when a garbage `Authorization` header is
//! present.

use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::{debug, error};

use crate::auth::extractors::CurrentUser;
use crate::auth::policy::{admit, AccessDecision, DenyReason};
use crate::auth::token::{validate_token, TokenError};
use crate::error::AppError;
use crate::store::UserStore;

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGateService<S> {
    // Rc because the gate awaits the principal lookup before forwarding,
    // so the inner service must move into the response future.
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            attach_principal(&req).await;

            let role = req.extensions().get::<CurrentUser>().map(|u| u.0.role);
            match admit(req.path(), role) {
                AccessDecision::Allow => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                AccessDecision::Deny(reason) => {
                    let err = match reason {
                        DenyReason::Unauthenticated => {
                            AppError::Unauthorized("Authentication required".into())
                        }
                        DenyReason::Forbidden => {
                            AppError::Forbidden("Insufficient privileges".into())
                        }
                    };
                    let response = err.error_response().map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

/// Extracts the compact token from an `Authorization: Bearer <token>` header.
///
/// Anything else (no header, a non-UTF-8 value, a different scheme) is
/// simply "no token".
fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// One gate pass: resolve the bearer token to a principal and attach it to
/// the request extensions. Every failure path leaves the request
/// unauthenticated without revealing why.
async fn attach_principal(req: &ServiceRequest) {
    // Idempotence guard: if a principal is already attached (the gate was
    // applied twice), this pass must not re-resolve or replace it.
    if req.extensions().get::<CurrentUser>().is_some() {
        return;
    }

    let token = match bearer_token(req) {
        Some(token) => token,
        None => return,
    };

    let claims = match validate_token(token) {
        Ok(claims) => claims,
        Err(TokenError::KeyUnavailable) => {
            error!("token validation failed closed: signing key not configured");
            return;
        }
        Err(e) => {
            debug!("rejected bearer token: {}", e);
            return;
        }
    };

    let store = match req.app_data::<web::Data<dyn UserStore>>() {
        Some(store) => store,
        None => {
            error!("user store not configured; request stays unauthenticated");
            return;
        }
    };

    match store.find_by_email(&claims.sub).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(CurrentUser(user));
        }
        Ok(None) => {
            // Valid signature, but the subject no longer exists.
            debug!("token subject no longer resolves to a user");
        }
        Err(e) => {
            error!("principal lookup failed: {}", e);
        }
    }
}
