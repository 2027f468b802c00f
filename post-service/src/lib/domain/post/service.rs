use std::sync::Arc;

use async_trait::async_trait;

use super::errors::PostError;
use super::models::AccessToken;
use super::models::Post;
use super::models::PostId;
use super::models::PostText;
use super::ports::Authorizer;
use super::ports::PostRepository;
use super::ports::PostServicePort;

/// Concrete implementation of PostServicePort.
///
/// Authorizes first, then passes the authorized identity as the owner
/// predicate of every repository call. Generic over repository and
/// authorizer for testability.
pub struct PostService<PR, AZ>
where
    PR: PostRepository,
    AZ: Authorizer,
{
    post_repository: Arc<PR>,
    authorizer: Arc<AZ>,
}

impl<PR, AZ> PostService<PR, AZ>
where
    PR: PostRepository,
    AZ: Authorizer,
{
    pub fn new(post_repository: Arc<PR>, authorizer: Arc<AZ>) -> Self {
        Self {
            post_repository,
            authorizer,
        }
    }
}

#[async_trait]
impl<PR, AZ> PostServicePort for PostService<PR, AZ>
where
    PR: PostRepository,
    AZ: Authorizer,
{
    async fn create_post(&self, token: &AccessToken, text: PostText) -> Result<PostId, PostError> {
        let owner = self.authorizer.authorize(token).await?;

        let id = self.post_repository.create(owner, &text).await?;

        tracing::info!(post_id = %id, user_id = %owner, "Post created");

        Ok(id)
    }

    async fn read_post(&self, token: &AccessToken, id: PostId) -> Result<Post, PostError> {
        let owner = self.authorizer.authorize(token).await?;

        self.post_repository
            .find_owned(id, owner)
            .await?
            .ok_or(PostError::NotFound(id))
    }

    async fn update_post(
        &self,
        token: &AccessToken,
        id: PostId,
        text: PostText,
    ) -> Result<(), PostError> {
        let owner = self.authorizer.authorize(token).await?;

        if !self.post_repository.update_owned(id, owner, &text).await? {
            return Err(PostError::NotFound(id));
        }

        tracing::info!(post_id = %id, user_id = %owner, "Post updated");

        Ok(())
    }

    async fn delete_post(&self, token: &AccessToken, id: PostId) -> Result<(), PostError> {
        let owner = self.authorizer.authorize(token).await?;

        if !self.post_repository.delete_owned(id, owner).await? {
            return Err(PostError::NotFound(id));
        }

        tracing::info!(post_id = %id, user_id = %owner, "Post deleted");

        Ok(())
    }
}
