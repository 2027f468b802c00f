use std::fmt;

use crate::post::errors::AccessTokenError;
use crate::post::errors::PostIdError;
use crate::post::errors::PostTextError;

/// Post owned by exactly one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub text: PostText,
}

/// Post unique identifier, assigned by the repository. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(i64);

impl PostId {
    /// # Errors
    /// * `NotPositive` - Identifier is zero or negative
    pub fn new(id: i64) -> Result<Self, PostIdError> {
        if id <= 0 {
            return Err(PostIdError::NotPositive(id));
        }
        Ok(Self(id))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity id as returned by the token authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostText(String);

impl PostText {
    /// # Errors
    /// * `Empty` - Text is empty
    pub fn new(text: String) -> Result<Self, PostTextError> {
        if text.is_empty() {
            return Err(PostTextError::Empty);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Bearer token forwarded to the token authority. Never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// # Errors
    /// * `Empty` - Token is empty
    pub fn new(token: String) -> Result<Self, AccessTokenError> {
        if token.is_empty() {
            return Err(AccessTokenError::Empty);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
