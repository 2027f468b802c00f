use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("could not sign claims: {0}")]
    EncodingFailed(String),

    /// Well-formed token whose signature does not verify under our key.
    #[error("signature does not verify")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    TokenExpired,
}
