use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::PostText;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::extractors::BearerToken;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn create_post(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<CreatePostRequestBody>,
) -> Result<ApiSuccess<CreatePostResponseData>, ApiError> {
    let text = PostText::new(body.text).map_err(PostError::from)?;

    let post_id = state.post_service.create_post(&token, text).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        CreatePostResponseData {
            post_id: post_id.get(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequestBody {
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePostResponseData {
    pub post_id: i64,
}
