use tonic::Status;

use crate::domain::user::models::AccessToken;
use crate::domain::user::ports::UserServicePort;
use crate::proto::LogoutResponse;
use crate::proto::TokenRequest;
use crate::user::errors::AuthError;

pub async fn logout(
    service: &dyn UserServicePort,
    request: TokenRequest,
) -> Result<LogoutResponse, Status> {
    let token = AccessToken::new(request.token).map_err(AuthError::from)?;

    let revoked = service.logout(&token).await?;

    Ok(LogoutResponse { revoked })
}
