use tonic::Status;

use crate::domain::user::models::Credential;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::UserServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::user::errors::AuthError;

pub async fn register(
    service: &dyn UserServicePort,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let email = EmailAddress::new(request.email).map_err(AuthError::from)?;
    let password = Credential::new(request.password).map_err(AuthError::from)?;

    let user_id = service
        .register(RegisterCommand::new(email, password))
        .await?;

    Ok(RegisterResponse { id: user_id.0 })
}
