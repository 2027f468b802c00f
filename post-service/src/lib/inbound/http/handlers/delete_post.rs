use axum::extract::Path;
use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::extractors::BearerToken;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn delete_post(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(post_id): Path<i64>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let post_id = PostId::new(post_id).map_err(PostError::from)?;

    state.post_service.delete_post(&token, post_id).await?;

    Ok(ApiSuccess::ok(MessageResponseData {
        message: "Post deleted".to_string(),
    }))
}
