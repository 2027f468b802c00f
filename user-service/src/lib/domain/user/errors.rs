use thiserror::Error;

use crate::domain::user::models::UserId;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Credential validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("password is required")]
    Empty,
}

/// Error for AccessToken validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    #[error("token is required")]
    Empty,
}

/// Why a presented token was refused.
///
/// Only ever logged; callers see a uniform "not authenticated".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("signature or format invalid: {0}")]
    Malformed(String),

    #[error("token expired")]
    Expired,

    #[error("no unexpired record for token")]
    NotOnRecord,

    #[error("token subject {claimed:?} does not match recorded identity {recorded}")]
    IdentityMismatch {
        claimed: Option<i64>,
        recorded: UserId,
    },
}

/// Top-level error for all token authority operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    InvalidCredential(#[from] CredentialError),

    #[error(transparent)]
    InvalidToken(#[from] AccessTokenError),

    // Domain-level errors
    #[error("Identity not found: {0}")]
    IdentityNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Not authenticated")]
    NotAuthenticated(TokenRejection),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::Password(e) => AuthError::Password(e),
            auth::AuthenticationError::Signing(e) => AuthError::Token(e),
        }
    }
}
