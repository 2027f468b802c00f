use tonic::Status;

use crate::user::errors::AuthError;

pub mod check_token;
pub mod login;
pub mod logout;
pub mod register;

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(_)
            | AuthError::InvalidCredential(_)
            | AuthError::InvalidToken(_) => Status::invalid_argument(err.to_string()),
            AuthError::EmailAlreadyExists(_) => Status::already_exists(err.to_string()),
            AuthError::InvalidCredentials => Status::unauthenticated("invalid credentials"),
            AuthError::NotAuthenticated(_) => Status::unauthenticated("not authenticated"),
            AuthError::IdentityNotFound(_)
            | AuthError::Password(_)
            | AuthError::Token(_)
            | AuthError::DatabaseError(_)
            | AuthError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                Status::internal("internal error")
            }
        }
    }
}
