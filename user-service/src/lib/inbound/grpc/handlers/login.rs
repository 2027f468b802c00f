use tonic::Status;

use crate::domain::user::models::Credential;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::user::errors::AuthError;

pub async fn login(
    service: &dyn UserServicePort,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let email = EmailAddress::new(request.email).map_err(AuthError::from)?;
    let password = Credential::new(request.password).map_err(AuthError::from)?;

    let token = service.login(LoginCommand::new(email, password)).await?;

    Ok(LoginResponse {
        token: token.into_inner(),
    })
}
