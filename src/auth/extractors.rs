use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{
    auth::jwt::{JwtKeys, Subject, TokenKind},
    error::ApiError,
};

/// Subject of a verified access token. Protected resource routes take this
/// in place of reading the Authorization header themselves.
pub struct AuthSubject(pub Subject);

/// Subject of a verified refresh token. Only POST /auth/refresh uses it.
pub struct RefreshSubject(pub Subject);

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .ok_or(ApiError::Unauthorized)
}

fn verify_subject<S>(parts: &Parts, state: &S, kind: TokenKind) -> Result<Subject, ApiError>
where
    JwtKeys: FromRef<S>,
{
    let keys = JwtKeys::from_ref(state);
    let token = bearer_token(parts)?;
    let claims = keys.verify(kind, token).map_err(|_| {
        // Signature and expiry failures are deliberately indistinguishable.
        warn!(kind = ?kind, "token verification failed");
        ApiError::Unauthorized
    })?;
    Ok(claims.into())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthSubject
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthSubject(verify_subject(parts, state, TokenKind::Access)?))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RefreshSubject
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(RefreshSubject(verify_subject(
            parts,
            state,
            TokenKind::Refresh,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).expect("request").into_parts();
        parts
    }

    #[test]
    fn bearer_token_strips_scheme() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).expect("token"), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let parts = parts_with_auth(None);
        assert!(matches!(
            bearer_token(&parts),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(
            bearer_token(&parts),
            Err(ApiError::Unauthorized)
        ));
    }
}
