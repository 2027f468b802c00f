use async_trait::async_trait;
use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Identity;
use crate::domain::user::models::TokenRecord;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::AuthError;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(operation: &'static str, e: sqlx::Error) -> AuthError {
    tracing::error!(operation, error = %e, "Credential store operation failed");
    AuthError::DatabaseError(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn insert_identity(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<UserId, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return AuthError::EmailAlreadyExists(email.to_string());
                }
            }
            database_error("insert_identity", e)
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| database_error("insert_identity", e))?;

        Ok(UserId(id))
    }

    async fn find_identity_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Identity>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find_identity_by_email", e))?;

        match row {
            Some(r) => {
                let id: i64 = r
                    .try_get("id")
                    .map_err(|e| database_error("find_identity_by_email", e))?;
                let email: String = r
                    .try_get("email")
                    .map_err(|e| database_error("find_identity_by_email", e))?;
                let password_hash: String = r
                    .try_get("password_hash")
                    .map_err(|e| database_error("find_identity_by_email", e))?;

                Ok(Some(Identity {
                    id: UserId(id),
                    email: EmailAddress::new(email)?,
                    password_hash,
                }))
            }
            None => Ok(None),
        }
    }

    async fn insert_token_record(&self, record: &TokenRecord) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO tokens (hash, user_id, expiry)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(record.token_hash.as_bytes())
        .bind(record.user_id.0)
        .bind(record.expiry)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("insert_token_record", e))?;

        Ok(())
    }

    async fn find_valid_token_record(
        &self,
        token_hash: &TokenDigest,
        now: DateTime<Utc>,
    ) -> Result<Option<UserId>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT user_id
            FROM tokens
            WHERE hash = $1 AND expiry > $2
            "#,
        )
        .bind(token_hash.as_bytes())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find_valid_token_record", e))?;

        row.map(|r| {
            r.try_get::<i64, _>("user_id")
                .map(UserId)
                .map_err(|e| database_error("find_valid_token_record", e))
        })
        .transpose()
    }

    async fn delete_token_record(&self, token_hash: &TokenDigest) -> Result<bool, AuthError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tokens
            WHERE hash = $1
            "#,
        )
        .bind(token_hash.as_bytes())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("delete_token_record", e))?;

        Ok(result.rows_affected() > 0)
    }
}
