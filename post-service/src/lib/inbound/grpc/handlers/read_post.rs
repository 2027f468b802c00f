use tonic::Status;

use crate::domain::post::models::AccessToken;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::post::errors::PostError;
use crate::proto::post::ReadPostRequest;
use crate::proto::post::ReadPostResponse;

pub async fn read_post(
    service: &dyn PostServicePort,
    request: ReadPostRequest,
) -> Result<ReadPostResponse, Status> {
    let token = AccessToken::new(request.token).map_err(PostError::from)?;
    let post_id = PostId::new(request.post_id).map_err(PostError::from)?;

    let post = service.read_post(&token, post_id).await?;

    Ok(ReadPostResponse {
        post: Some(post.into()),
    })
}
