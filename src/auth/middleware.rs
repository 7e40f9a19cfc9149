use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use super::{error::AuthError, jwt::TokenService};

/// Authenticated user id, placed in request extensions by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let raw = match headers.get(AUTHORIZATION) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AuthError::MissingToken),
    };
    let value = raw
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("token error"))?;

    let parts: Vec<&str> = value.split(' ').collect();
    let [scheme, token] = parts.as_slice() else {
        return Err(AuthError::MalformedHeader("token error"));
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader("malformed token"));
    }
    Ok(*token)
}

/// Resolves the caller's user id from the request headers.
pub fn authenticate_request(tokens: &TokenService, headers: &HeaderMap) -> Result<Uuid, AuthError> {
    let token = bearer_token(headers)?;
    tokens.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AuthError::Unauthorized
    })
}

pub async fn require_auth(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user_id = authenticate_request(&tokens, request.headers())?;
    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().copied().ok_or_else(|| {
            warn!("AuthUser missing from request extensions");
            AuthError::Unauthorized
        })
    }
}
