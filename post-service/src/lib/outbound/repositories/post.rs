use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostText;
use crate::domain::post::models::UserId;
use crate::domain::post::ports::PostRepository;
use crate::post::errors::PostError;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(operation: &'static str, e: sqlx::Error) -> PostError {
    tracing::error!(operation, error = %e, "Post repository operation failed");
    PostError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, owner: UserId, text: &PostText) -> Result<PostId, PostError> {
        let row = sqlx::query(
            r#"
            INSERT INTO posts (user_id, text)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(owner.0)
        .bind(text.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("create", e))?;

        let id: i64 = row.try_get("id").map_err(|e| database_error("create", e))?;

        Ok(PostId::new(id)?)
    }

    async fn find_owned(&self, id: PostId, owner: UserId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, text
            FROM posts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.get())
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find_owned", e))?;

        match row {
            Some(r) => {
                let text: String = r
                    .try_get("text")
                    .map_err(|e| database_error("find_owned", e))?;

                Ok(Some(Post {
                    id,
                    user_id: owner,
                    text: PostText::new(text)?,
                }))
            }
            None => Ok(None),
        }
    }

    async fn update_owned(
        &self,
        id: PostId,
        owner: UserId,
        text: &PostText,
    ) -> Result<bool, PostError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET text = $3
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.get())
        .bind(owner.0)
        .bind(text.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update_owned", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, id: PostId, owner: UserId) -> Result<bool, PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.get())
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("delete_owned", e))?;

        Ok(result.rows_affected() > 0)
    }
}
