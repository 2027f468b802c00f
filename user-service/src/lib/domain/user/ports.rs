use async_trait::async_trait;
use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Identity;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenRecord;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;

/// Port for token authority operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `command` - Validated email and password
    ///
    /// # Returns
    /// Identifier assigned to the new identity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Exchange credentials for a freshly issued token.
    ///
    /// The token is returned only once its record has been written.
    ///
    /// # Errors
    /// * `IdentityNotFound` - No identity with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError>;

    /// Resolve a presented token to the identity it was issued to.
    ///
    /// # Errors
    /// * `NotAuthenticated` - Token is malformed, expired, revoked or unknown
    /// * `DatabaseError` - Store operation failed
    async fn check_token(&self, token: &AccessToken) -> Result<UserId, AuthError>;

    /// Revoke a token by deleting its record.
    ///
    /// # Returns
    /// Whether a record was deleted
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn logout(&self, token: &AccessToken) -> Result<bool, AuthError>;
}

/// Persistence for identities and issued-token records.
///
/// Every method is a single read or a single write.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert_identity(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<UserId, AuthError>;

    /// Retrieve identity by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_identity_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Identity>, AuthError>;

    /// Persist an issued-token record.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert_token_record(&self, record: &TokenRecord) -> Result<(), AuthError>;

    /// Find the owner of a record with this digest whose expiry is strictly
    /// after `now`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_valid_token_record(
        &self,
        token_hash: &TokenDigest,
        now: DateTime<Utc>,
    ) -> Result<Option<UserId>, AuthError>;

    /// Remove the record with this digest.
    ///
    /// # Returns
    /// Whether a record existed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_token_record(&self, token_hash: &TokenDigest) -> Result<bool, AuthError>;
}

/// Source of the current time for issuance and expiry checks.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}
