use axum::extract::State;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::extractors::BearerToken;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    let revoked = state.user_service.logout(&token).await?;

    Ok(ApiSuccess::ok(LogoutResponseData { revoked }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub revoked: bool,
}
