use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use chrono::Duration;
use chrono::SubsecRound;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenRecord;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::errors::TokenRejection;
use crate::user::ports::Clock;
use crate::user::ports::CredentialStore;
use crate::user::ports::UserServicePort;

/// Token authority: issues tokens on login and verifies presented tokens
/// against both their signature and the persisted record.
///
/// Holds no mutable state of its own. The store, clock, signing key and
/// token lifetime are all injected.
pub struct TokenAuthority<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    store: Arc<CS>,
    clock: Arc<C>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<CS, C> TokenAuthority<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    /// Create a new token authority with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Identity and token record persistence
    /// * `clock` - Time source for issuance and expiry checks
    /// * `authenticator` - Password hasher and token signer
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(
        store: Arc<CS>,
        clock: Arc<C>,
        authenticator: Arc<Authenticator>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            authenticator,
            token_ttl,
        }
    }

    fn reject(reason: TokenRejection) -> AuthError {
        tracing::warn!(reason = %reason, "Token rejected");
        AuthError::NotAuthenticated(reason)
    }
}

#[async_trait]
impl<CS, C> UserServicePort for TokenAuthority<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        let RegisterCommand { email, password } = command;

        // Argon2 is deliberately slow; keep it off the async workers.
        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| AuthError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let user_id = self.store.insert_identity(&email, &password_hash).await?;

        tracing::info!(user_id = %user_id, "Identity registered");

        Ok(user_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError> {
        let LoginCommand { email, password } = command;

        let identity = self
            .store
            .find_identity_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::IdentityNotFound(email.to_string()))?;

        // Whole seconds, so the record expires at the same instant as `exp`.
        let issued_at = self.clock.now().trunc_subsecs(0);
        let expiry = issued_at + self.token_ttl;
        let claims = Claims::for_identity(
            identity.id.0,
            identity.email.as_str(),
            issued_at,
            self.token_ttl,
        );

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = identity.password_hash;
        let issued = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &stored_hash, &claims)
        })
        .await
        .map_err(|e| AuthError::Unknown(format!("Password verification task failed: {}", e)))??;

        let record = TokenRecord {
            token_hash: issued.digest,
            user_id: identity.id,
            expiry,
        };
        self.store.insert_token_record(&record).await?;

        tracing::info!(
            user_id = %identity.id,
            expiry = %record.expiry,
            "Token issued"
        );

        Ok(AccessToken::new(issued.token)?)
    }

    async fn check_token(&self, token: &AccessToken) -> Result<UserId, AuthError> {
        let now = self.clock.now();

        let claims: Claims = self
            .authenticator
            .validate_token(token.as_str())
            .map_err(|e| match e {
                auth::JwtError::TokenExpired => Self::reject(TokenRejection::Expired),
                other => Self::reject(TokenRejection::Malformed(other.to_string())),
            })?;

        if claims.is_expired(now.timestamp()) {
            return Err(Self::reject(TokenRejection::Expired));
        }

        let user_id = self
            .store
            .find_valid_token_record(&token.digest(), now)
            .await?
            .ok_or_else(|| Self::reject(TokenRejection::NotOnRecord))?;

        if claims.identity_id() != Some(user_id.0) {
            return Err(Self::reject(TokenRejection::IdentityMismatch {
                claimed: claims.identity_id(),
                recorded: user_id,
            }));
        }

        tracing::debug!(user_id = %user_id, "Token checked");

        Ok(user_id)
    }

    async fn logout(&self, token: &AccessToken) -> Result<bool, AuthError> {
        let revoked = self.store.delete_token_record(&token.digest()).await?;

        tracing::info!(revoked, "Token revocation requested");

        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use auth::TokenDigest;
    use chrono::DateTime;
    use chrono::SubsecRound;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::Credential;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Identity;

    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn insert_identity(&self, email: &EmailAddress, password_hash: &str) -> Result<UserId, AuthError>;
            async fn find_identity_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, AuthError>;
            async fn insert_token_record(&self, record: &TokenRecord) -> Result<(), AuthError>;
            async fn find_valid_token_record(&self, token_hash: &TokenDigest, now: DateTime<Utc>) -> Result<Option<UserId>, AuthError>;
            async fn delete_token_record(&self, token_hash: &TokenDigest) -> Result<bool, AuthError>;
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::with_password_hasher(
            SECRET,
            PasswordHasher::with_cost(1024, 1, 1).unwrap(),
        ))
    }

    fn authority(
        store: MockTestCredentialStore,
        now: DateTime<Utc>,
    ) -> TokenAuthority<MockTestCredentialStore, FixedClock> {
        TokenAuthority::new(
            Arc::new(store),
            Arc::new(FixedClock(now)),
            authenticator(),
            Duration::hours(1),
        )
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw.to_string()).unwrap()
    }

    fn credential(raw: &str) -> Credential {
        Credential::new(raw.to_string()).unwrap()
    }

    fn identity(id: i64, raw_email: &str, password: &str) -> Identity {
        Identity {
            id: UserId(id),
            email: email(raw_email),
            password_hash: authenticator().hash_password(password).unwrap(),
        }
    }

    /// Mint a token the same way `login` does, without going through a store.
    fn mint(user_id: i64, issued_at: DateTime<Utc>) -> AccessToken {
        let claims = Claims::for_identity(user_id, "a@x.com", issued_at, Duration::hours(1));
        let issued = authenticator().issue(&claims).unwrap();
        AccessToken::new(issued.token).unwrap()
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_insert_identity()
            .withf(|email, hash| email.as_str() == "a@x.com" && hash.starts_with("$argon2id$"))
            .times(1)
            .returning(|_, _| Ok(UserId(1)));

        let authority = authority(store, Utc::now());
        let command = RegisterCommand::new(email("a@x.com"), credential("pw1"));

        let result = authority.register(command).await;
        assert_eq!(result.unwrap(), UserId(1));
    }

    #[tokio::test]
    async fn test_register_never_stores_plaintext() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_insert_identity()
            .withf(|_, hash| !hash.contains("pw1"))
            .times(1)
            .returning(|_, _| Ok(UserId(1)));

        let authority = authority(store, Utc::now());
        let command = RegisterCommand::new(email("a@x.com"), credential("pw1"));

        assert!(authority.register(command).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_insert_identity()
            .times(1)
            .returning(|email, _| Err(AuthError::EmailAlreadyExists(email.to_string())));

        let authority = authority(store, Utc::now());
        let command = RegisterCommand::new(email("a@x.com"), credential("pw1"));

        let result = authority.register(command).await;
        assert!(matches!(result, Err(AuthError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success_persists_record_before_returning() {
        let now = Utc::now();
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_identity_by_email()
            .withf(|email| email.as_str() == "a@x.com")
            .times(1)
            .returning(|_| Ok(Some(identity(1, "a@x.com", "pw1"))));

        store
            .expect_insert_token_record()
            .withf(move |record| {
                record.user_id == UserId(1)
                    && record.expiry == now.trunc_subsecs(0) + Duration::hours(1)
            })
            .times(1)
            .returning(|_| Ok(()));

        let authority = authority(store, now);
        let command = LoginCommand::new(email("a@x.com"), credential("pw1"));

        let token = authority.login(command).await.expect("Login failed");

        let claims: Claims = authenticator().validate_token(token.as_str()).unwrap();
        assert_eq!(claims.identity_id(), Some(1));
        assert_eq!(claims.email(), Some("a@x.com".to_string()));
        assert_eq!(claims.exp, Some((now + Duration::hours(1)).timestamp()));
    }

    #[tokio::test]
    async fn test_token_and_record_expire_together_at_fractional_second() {
        let issued_at = Utc::now().trunc_subsecs(0) + Duration::milliseconds(900);
        let recorded = Arc::new(std::sync::Mutex::new(None));
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_identity_by_email()
            .returning(|_| Ok(Some(identity(1, "a@x.com", "pw1"))));

        let sink = Arc::clone(&recorded);
        store.expect_insert_token_record().returning(move |record| {
            *sink.lock().unwrap() = Some(record.expiry);
            Ok(())
        });

        let token = authority(store, issued_at)
            .login(LoginCommand::new(email("a@x.com"), credential("pw1")))
            .await
            .unwrap();

        let expiry = recorded.lock().unwrap().expect("No record persisted");
        let claims: Claims = authenticator().validate_token(token.as_str()).unwrap();
        assert_eq!(expiry.timestamp_subsec_nanos(), 0);
        assert_eq!(claims.exp, Some(expiry.timestamp()));

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_valid_token_record()
            .times(1)
            .returning(|_, _| Ok(Some(UserId(1))));
        let just_before = authority(store, expiry - Duration::milliseconds(1));
        assert_eq!(just_before.check_token(&token).await.unwrap(), UserId(1));

        let mut store = MockTestCredentialStore::new();
        store.expect_find_valid_token_record().times(0);
        let at_expiry = authority(store, expiry);
        assert!(matches!(
            at_expiry.check_token(&token).await,
            Err(AuthError::NotAuthenticated(TokenRejection::Expired))
        ));
    }

    #[tokio::test]
    async fn test_login_records_digest_of_returned_token() {
        let recorded = Arc::new(std::sync::Mutex::new(None));
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_identity_by_email()
            .returning(|_| Ok(Some(identity(1, "a@x.com", "pw1"))));

        let sink = Arc::clone(&recorded);
        store.expect_insert_token_record().returning(move |record| {
            *sink.lock().unwrap() = Some(record.token_hash);
            Ok(())
        });

        let authority = authority(store, Utc::now());
        let token = authority
            .login(LoginCommand::new(email("a@x.com"), credential("pw1")))
            .await
            .unwrap();

        assert_eq!(*recorded.lock().unwrap(), Some(token.digest()));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_identity_by_email()
            .times(1)
            .returning(|_| Ok(None));
        store.expect_insert_token_record().times(0);

        let authority = authority(store, Utc::now());
        let command = LoginCommand::new(email("nobody@x.com"), credential("pw1"));

        let result = authority.login(command).await;
        assert!(matches!(result, Err(AuthError::IdentityNotFound(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_identity_by_email()
            .times(1)
            .returning(|_| Ok(Some(identity(1, "a@x.com", "pw1"))));
        store.expect_insert_token_record().times(0);

        let authority = authority(store, Utc::now());
        let command = LoginCommand::new(email("a@x.com"), credential("wrong"));

        let result = authority.login(command).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_fails_when_record_cannot_be_persisted() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_identity_by_email()
            .returning(|_| Ok(Some(identity(1, "a@x.com", "pw1"))));
        store
            .expect_insert_token_record()
            .times(1)
            .returning(|_| Err(AuthError::DatabaseError("connection reset".to_string())));

        let authority = authority(store, Utc::now());
        let command = LoginCommand::new(email("a@x.com"), credential("pw1"));

        let result = authority.login(command).await;
        assert!(matches!(result, Err(AuthError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_login_malformed_stored_hash() {
        let mut store = MockTestCredentialStore::new();

        store.expect_find_identity_by_email().returning(|_| {
            Ok(Some(Identity {
                id: UserId(1),
                email: EmailAddress::new("a@x.com".to_string()).unwrap(),
                password_hash: "plaintext-by-mistake".to_string(),
            }))
        });
        store.expect_insert_token_record().times(0);

        let authority = authority(store, Utc::now());
        let command = LoginCommand::new(email("a@x.com"), credential("pw1"));

        let result = authority.login(command).await;
        assert!(matches!(result, Err(AuthError::Password(_))));
    }

    #[tokio::test]
    async fn test_check_token_success() {
        let now = Utc::now();
        let token = mint(1, now);
        let expected_digest = token.digest();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_valid_token_record()
            .withf(move |digest, at| *digest == expected_digest && *at == now)
            .times(1)
            .returning(|_, _| Ok(Some(UserId(1))));

        let authority = authority(store, now);

        let result = authority.check_token(&token).await;
        assert_eq!(result.unwrap(), UserId(1));
    }

    #[tokio::test]
    async fn test_check_token_garbage_never_reaches_store() {
        let mut store = MockTestCredentialStore::new();
        store.expect_find_valid_token_record().times(0);

        let authority = authority(store, Utc::now());
        let token = AccessToken::new("garbage".to_string()).unwrap();

        let result = authority.check_token(&token).await;
        assert!(matches!(
            result,
            Err(AuthError::NotAuthenticated(TokenRejection::Malformed(_)))
        ));
    }

    #[tokio::test]
    async fn test_check_token_without_record() {
        let now = Utc::now();
        let token = mint(1, now);

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_valid_token_record()
            .times(1)
            .returning(|_, _| Ok(None));

        let authority = authority(store, now);

        let result = authority.check_token(&token).await;
        assert!(matches!(
            result,
            Err(AuthError::NotAuthenticated(TokenRejection::NotOnRecord))
        ));
    }

    #[tokio::test]
    async fn test_check_token_after_expiry() {
        let issued_at = Utc::now();
        let token = mint(1, issued_at);

        let mut store = MockTestCredentialStore::new();
        store.expect_find_valid_token_record().times(0);

        let authority = authority(store, issued_at + Duration::hours(2));

        let result = authority.check_token(&token).await;
        assert!(matches!(
            result,
            Err(AuthError::NotAuthenticated(TokenRejection::Expired))
        ));
    }

    #[tokio::test]
    async fn test_check_token_identity_mismatch() {
        let now = Utc::now();
        let token = mint(1, now);

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_valid_token_record()
            .returning(|_, _| Ok(Some(UserId(2))));

        let authority = authority(store, now);

        let result = authority.check_token(&token).await;
        assert!(matches!(
            result,
            Err(AuthError::NotAuthenticated(
                TokenRejection::IdentityMismatch { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_check_token_store_failure_is_not_masked() {
        let now = Utc::now();
        let token = mint(1, now);

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_valid_token_record()
            .returning(|_, _| Err(AuthError::DatabaseError("timeout".to_string())));

        let authority = authority(store, now);

        let result = authority.check_token(&token).await;
        assert!(matches!(result, Err(AuthError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_logout_deletes_record_by_digest() {
        let token = mint(1, Utc::now());
        let expected_digest = token.digest();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_delete_token_record()
            .withf(move |digest| *digest == expected_digest)
            .times(1)
            .returning(|_| Ok(true));

        let authority = authority(store, Utc::now());

        assert!(authority.logout(&token).await.unwrap());
    }
}
