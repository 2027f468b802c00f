use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored value is not a PHC string we can verify against.
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Invalid password hashing parameters: {0}")]
    InvalidParameters(String),
}
