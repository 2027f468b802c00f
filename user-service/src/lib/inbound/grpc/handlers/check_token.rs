use tonic::Status;

use crate::domain::user::models::AccessToken;
use crate::domain::user::ports::UserServicePort;
use crate::proto::TokenRequest;
use crate::proto::TokenResponse;
use crate::user::errors::AuthError;

pub async fn check_token(
    service: &dyn UserServicePort,
    request: TokenRequest,
) -> Result<TokenResponse, Status> {
    let token = AccessToken::new(request.token).map_err(AuthError::from)?;

    let user_id = service.check_token(&token).await?;

    Ok(TokenResponse {
        user_id: user_id.0,
        is_authenticated: true,
    })
}
