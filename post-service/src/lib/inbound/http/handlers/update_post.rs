use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostText;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::extractors::BearerToken;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn update_post(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(post_id): Path<i64>,
    Json(body): Json<UpdatePostRequestBody>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let post_id = PostId::new(post_id).map_err(PostError::from)?;
    let text = PostText::new(body.text).map_err(PostError::from)?;

    state.post_service.update_post(&token, post_id, text).await?;

    Ok(ApiSuccess::ok(MessageResponseData {
        message: "Post updated".to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePostRequestBody {
    text: String,
}
