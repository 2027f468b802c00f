use thiserror::Error;

use crate::domain::post::models::PostId;

/// Error type for PostId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("post id must be positive, got {0}")]
    NotPositive(i64),
}

/// Error type for PostText validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostTextError {
    #[error("text is required")]
    Empty,
}

/// Error type for AccessToken validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    #[error("token is required")]
    Empty,
}

/// Top-level error type for all post operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error(transparent)]
    InvalidPostId(#[from] PostIdError),

    #[error(transparent)]
    InvalidText(#[from] PostTextError),

    #[error(transparent)]
    InvalidToken(#[from] AccessTokenError),

    /// The token authority did not vouch for the caller.
    #[error("Not authenticated")]
    Denied,

    /// No post with this id is owned by the caller.
    #[error("Post not found: {0}")]
    NotFound(PostId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
