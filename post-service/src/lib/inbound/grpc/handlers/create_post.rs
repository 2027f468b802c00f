use tonic::Status;

use crate::domain::post::models::AccessToken;
use crate::domain::post::models::PostText;
use crate::domain::post::ports::PostServicePort;
use crate::post::errors::PostError;
use crate::proto::post::CreatePostRequest;
use crate::proto::post::CreatePostResponse;

pub async fn create_post(
    service: &dyn PostServicePort,
    request: CreatePostRequest,
) -> Result<CreatePostResponse, Status> {
    let token = AccessToken::new(request.token).map_err(PostError::from)?;
    let text = PostText::new(request.text).map_err(PostError::from)?;

    let post_id = service.create_post(&token, text).await?;

    Ok(CreatePostResponse {
        post_id: post_id.get(),
    })
}
