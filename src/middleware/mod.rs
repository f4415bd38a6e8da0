/// HTTP middleware for blog-service.
///
/// Session resolution happens once per request: the middleware looks
/// the presented token up against the sessions table and stashes the
/// resolved identity in request extensions. Handlers then declare
/// their authentication requirement through the `CurrentUser`
/// extractor (`Option<CurrentUser>` where anonymous access is fine).
/// Token issuance itself belongs to the external auth service.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sqlx::PgPool;
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::db::user_repo;
use crate::error::AppError;

/// Authenticated requester, resolved from the session token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

/// Middleware that resolves the session token into a `CurrentUser`.
///
/// Resolution failures never reject the request here; routes that
/// require authentication enforce it through the extractor so that
/// anonymous reads keep working.
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionAuthService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            if let Some(token) = session_token(&req) {
                let pool = req.app_data::<web::Data<PgPool>>().cloned();
                if let Some(pool) = pool {
                    match user_repo::find_user_by_session(&pool, &token).await {
                        Ok(Some(user)) => {
                            req.extensions_mut().insert(CurrentUser {
                                id: user.id,
                                username: user.username,
                            });
                        }
                        Ok(None) => {}
                        Err(err) => {
                            tracing::warn!("session lookup failed: {}", err);
                        }
                    }
                }
            }

            service.call(req).await
        })
    }
}

/// Token from `Authorization: Bearer ...` or the `session` cookie.
fn session_token(req: &ServiceRequest) -> Option<String> {
    if let Some(header) = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = header.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    req.cookie("session").map(|c| c.value().to_string())
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CurrentUser>()
                .cloned()
                .ok_or_else(|| AppError::Unauthenticated {
                    next: req.path().to_string(),
                }),
        )
    }
}
