use std::fmt;
use std::str::FromStr;

use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::AccessTokenError;
use crate::user::errors::CredentialError;
use crate::user::errors::EmailError;

/// Registered account.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Identity unique identifier, assigned by the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Non-empty and RFC 5322 compliant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is empty
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password supplied during registration or login.
///
/// Lives only for the duration of one request and is never persisted or
/// logged.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// # Errors
    /// * `Empty` - Password is empty
    pub fn new(password: String) -> Result<Self, CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Opaque bearer token as presented by or handed to a client.
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

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Digest under which this token is recorded.
    pub fn digest(&self) -> TokenDigest {
        TokenDigest::of(&self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({:?})", self.digest())
    }
}

/// Durable record of an issued token.
///
/// Written once at login and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub token_hash: TokenDigest,
    pub user_id: UserId,
    pub expiry: DateTime<Utc>,
}

impl TokenRecord {
    /// A record is valid strictly before its expiry.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry > now
    }
}

/// Command to register a new identity.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Credential,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, password: Credential) -> Self {
        Self { email, password }
    }
}

/// Command to exchange credentials for a token.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Credential,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: Credential) -> Self {
        Self { email, password }
    }
}
