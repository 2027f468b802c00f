use tonic::Status;

use crate::domain::post::models::AccessToken;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostText;
use crate::domain::post::ports::PostServicePort;
use crate::post::errors::PostError;
use crate::proto::post::UpdatePostRequest;
use crate::proto::post::UpdatePostResponse;

pub async fn update_post(
    service: &dyn PostServicePort,
    request: UpdatePostRequest,
) -> Result<UpdatePostResponse, Status> {
    let token = AccessToken::new(request.token).map_err(PostError::from)?;
    let post_id = PostId::new(request.post_id).map_err(PostError::from)?;
    let text = PostText::new(request.new_text).map_err(PostError::from)?;

    service.update_post(&token, post_id, text).await?;

    Ok(UpdatePostResponse {
        msg: "Post updated".to_string(),
    })
}
