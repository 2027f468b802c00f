use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::digest::TokenDigest;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Checks passwords against stored hashes and signs tokens for the
/// identities that pass.
///
/// Built once per process from configuration and shared behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// A freshly signed token together with the digest under which it is stored.
pub struct IssuedToken {
    pub token: String,
    pub digest: TokenDigest,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Signing error: {0}")]
    Signing(#[from] JwtError),
}

impl Authenticator {
    /// Uses the default Argon2 cost.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_password_hasher(jwt_secret, PasswordHasher::new())
    }

    pub fn with_password_hasher(jwt_secret: &[u8], password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Produce a salted PHC string for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Sign `claims` without checking any password.
    pub fn issue<T: Serialize>(&self, claims: &T) -> Result<IssuedToken, JwtError> {
        let token = self.jwt_handler.encode(claims)?;
        let digest = TokenDigest::of(&token);
        Ok(IssuedToken { token, digest })
    }

    /// Verify `password` against `stored_hash`, then sign `claims`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is not a valid PHC string
    /// * `Signing` - Claims could not be signed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue(claims)?)
    }

    /// Signature and `exp` check only. A token that passes may still have
    /// been revoked; consult the token store for that.
    pub fn validate_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}
