use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AccessToken;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

pub async fn check_token(
    State(state): State<AppState>,
    Json(body): Json<CheckTokenRequestBody>,
) -> Result<ApiSuccess<CheckTokenResponseData>, ApiError> {
    let token = AccessToken::new(body.token).map_err(AuthError::from)?;

    let user_id = state.user_service.check_token(&token).await?;

    Ok(ApiSuccess::ok(CheckTokenResponseData {
        user_id: user_id.0,
        is_authenticated: true,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckTokenRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckTokenResponseData {
    pub user_id: i64,
    pub is_authenticated: bool,
}
