use tonic::Status;

use crate::domain::post::models::Post;
use crate::post::errors::PostError;

pub mod create_post;
pub mod delete_post;
pub mod read_post;
pub mod update_post;

impl From<Post> for crate::proto::post::PostInfo {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.id.get(),
            user_id: post.user_id.0,
            text: post.text.as_str().to_string(),
        }
    }
}

impl From<PostError> for Status {
    fn from(err: PostError) -> Self {
        match err {
            PostError::InvalidPostId(_) | PostError::InvalidText(_) | PostError::InvalidToken(_) => {
                Status::invalid_argument(err.to_string())
            }
            PostError::Denied => Status::unauthenticated("not authenticated"),
            PostError::NotFound(_) => Status::not_found("post not found"),
            PostError::DatabaseError(_) | PostError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                Status::internal("internal error")
            }
        }
    }
}
