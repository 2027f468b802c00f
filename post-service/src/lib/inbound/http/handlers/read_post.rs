use axum::extract::Path;
use axum::extract::State;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::extractors::BearerToken;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn read_post(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(post_id): Path<i64>,
) -> Result<ApiSuccess<PostResponseData>, ApiError> {
    let post_id = PostId::new(post_id).map_err(PostError::from)?;

    state
        .post_service
        .read_post(&token, post_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::ok(post.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostResponseData {
    pub post_id: i64,
    pub user_id: i64,
    pub text: String,
}

impl From<&Post> for PostResponseData {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.id.get(),
            user_id: post.user_id.0,
            text: post.text.as_str().to_string(),
        }
    }
}
