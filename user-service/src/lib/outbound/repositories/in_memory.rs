use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Identity;
use crate::domain::user::models::TokenRecord;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::AuthError;

/// Process-local credential store.
///
/// Used by the integration tests and for running the service without a
/// database. Identifiers start at 1 and grow monotonically.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    identities: HashMap<String, Identity>,
    tokens: HashMap<TokenDigest, TokenRecord>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, AuthError> {
        self.state
            .lock()
            .map_err(|_| AuthError::DatabaseError("credential store lock poisoned".to_string()))
    }

    /// Number of token records currently held, expired ones included.
    pub fn token_record_count(&self) -> Result<usize, AuthError> {
        Ok(self.lock()?.tokens.len())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert_identity(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<UserId, AuthError> {
        let mut state = self.lock()?;

        if state.identities.contains_key(email.as_str()) {
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        state.last_id += 1;
        let id = UserId(state.last_id);
        state.identities.insert(
            email.as_str().to_string(),
            Identity {
                id,
                email: email.clone(),
                password_hash: password_hash.to_string(),
            },
        );

        Ok(id)
    }

    async fn find_identity_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Identity>, AuthError> {
        Ok(self.lock()?.identities.get(email.as_str()).cloned())
    }

    async fn insert_token_record(&self, record: &TokenRecord) -> Result<(), AuthError> {
        self.lock()?
            .tokens
            .insert(record.token_hash, record.clone());
        Ok(())
    }

    async fn find_valid_token_record(
        &self,
        token_hash: &TokenDigest,
        now: DateTime<Utc>,
    ) -> Result<Option<UserId>, AuthError> {
        Ok(self
            .lock()?
            .tokens
            .get(token_hash)
            .filter(|record| record.is_valid_at(now))
            .map(|record| record.user_id))
    }

    async fn delete_token_record(&self, token_hash: &TokenDigest) -> Result<bool, AuthError> {
        Ok(self.lock()?.tokens.remove(token_hash).is_some())
    }
}
