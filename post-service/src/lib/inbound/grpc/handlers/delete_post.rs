use tonic::Status;

use crate::domain::post::models::AccessToken;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::post::errors::PostError;
use crate::proto::post::DeletePostRequest;
use crate::proto::post::DeletePostResponse;

pub async fn delete_post(
    service: &dyn PostServicePort,
    request: DeletePostRequest,
) -> Result<DeletePostResponse, Status> {
    let token = AccessToken::new(request.token).map_err(PostError::from)?;
    let post_id = PostId::new(request.post_id).map_err(PostError::from)?;

    service.delete_post(&token, post_id).await?;

    Ok(DeletePostResponse {
        msg: "Post deleted".to_string(),
    })
}
