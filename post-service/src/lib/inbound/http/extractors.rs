use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::handlers::ApiError;
use crate::domain::post::models::AccessToken;
use crate::post::errors::PostError;

/// Token taken from an `Authorization: Bearer <token>` header.
///
/// Only the header shape is checked here; the token authority decides
/// whether the token is any good.
#[derive(Debug, Clone)]
pub struct BearerToken(pub AccessToken);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError::unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
            })?;

        AccessToken::new(token.trim().to_string())
            .map(BearerToken)
            .map_err(|e| ApiError::from(PostError::from(e)))
    }
}
