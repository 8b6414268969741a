//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware reads the `Authorization` and `User-Agent` headers,
//! validates the access token through an [`AuthGuard`] and injects the
//! caller's [`AuthContext`] into request extensions.
//!
//! Rejections answer `401` with a generic body; the precise reason is only
//! logged. A session store that cannot be reached answers `503`. When the
//! token is close to expiry, the renewed token is returned in the
//! `x-jwt-token` response header.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::{HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT, WWW_AUTHENTICATE},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use vg_core::{AuthGuard, Claims, DomainError, GuardDecision};

/// Response header carrying a renewed access token
pub const RENEWED_TOKEN_HEADER: &str = "x-jwt-token";

/// User authentication context injected into requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: i64,
    /// Session the token belongs to, used for logout
    pub session_id: String,
    /// JWT ID for tracking
    pub jti: String,
    /// Access token expiry (unix seconds)
    pub expires_at: i64,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.uid,
            session_id: claims.sid.clone(),
            jti: claims.jti.clone(),
            expires_at: claims.exp,
        }
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    guard: Arc<AuthGuard>,
}

impl JwtAuth {
    /// Creates the middleware around a configured guard
    ///
    /// Paths registered with `AuthGuard::ignore_path` pass without a token.
    pub fn new(guard: Arc<AuthGuard>) -> Self {
        Self { guard }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            guard: self.guard.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    guard: Arc<AuthGuard>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let guard = Arc::clone(&self.guard);

        Box::pin(async move {
            let path = req.path().to_string();
            let authorization = header_str(&req, AUTHORIZATION);
            let user_agent = header_str(&req, USER_AGENT);

            let decision = guard
                .authorize(&path, authorization.as_deref(), user_agent.as_deref())
                .await;

            let access = match decision {
                Ok(GuardDecision::Skipped) => {
                    return service.call(req).await.map(ServiceResponse::map_into_left_body);
                }
                Ok(GuardDecision::Authorized(access)) => access,
                Err(e) => return Ok(reject(req, &path, &e)),
            };

            req.extensions_mut().insert(AuthContext::from_claims(&access.claims));

            let mut res = service.call(req).await?;
            if let Some(token) = access.renewed_token {
                match HeaderValue::from_str(&token) {
                    Ok(value) => {
                        res.headers_mut().insert(HeaderName::from_static(RENEWED_TOKEN_HEADER), value);
                    }
                    Err(e) => tracing::warn!(error = %e, "Renewed token is not a valid header value"),
                }
            }
            Ok(res.map_into_left_body())
        })
    }
}

/// Header value as text; non-ASCII values count as absent
fn header_str(req: &ServiceRequest, name: HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Short-circuit a request that did not pass the guard
fn reject<B>(req: ServiceRequest, path: &str, error: &DomainError) -> ServiceResponse<EitherBody<B>> {
    let response = if error.is_unavailable() {
        tracing::error!(path = path, error = %error, event = "auth_unavailable", "Session store unavailable");
        HttpResponse::ServiceUnavailable().json(ErrorBody {
            error: "service_unavailable",
        })
    } else {
        tracing::info!(path = path, reason = %error, event = "token_rejected", "Request rejected");
        HttpResponse::Unauthorized()
            .insert_header((WWW_AUTHENTICATE, "Bearer"))
            .json(ErrorBody { error: "unauthorized" })
    };
    req.into_response(response.map_into_right_body())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::std::prelude::v1::test]
    fn test_header_str() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(header_str(&req, AUTHORIZATION), Some("Bearer test_token_123".to_string()));

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(header_str(&req_no_header, AUTHORIZATION), None);
    }

    #[::std::prelude::v1::test]
    fn test_auth_context_from_claims() {
        let claims = Claims {
            uid: 42,
            sid: "session-1".to_string(),
            fingerprint: "digest".to_string(),
            kind: vg_core::TokenKind::Access,
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            iss: "verigate".to_string(),
            jti: "jti-1".to_string(),
        };

        let context = AuthContext::from_claims(&claims);
        assert_eq!(context.user_id, 42);
        assert_eq!(context.session_id, "session-1");
        assert_eq!(context.expires_at, 1_700_003_600);
    }
}
