use async_trait::async_trait;

use crate::domain::post::models::AccessToken;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostText;
use crate::domain::post::models::UserId;
use crate::post::errors::PostError;

/// Port for post domain service operations.
///
/// Every operation authorizes the token before touching storage.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post owned by the token's identity.
    ///
    /// # Errors
    /// * `Denied` - Token not accepted by the token authority
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, token: &AccessToken, text: PostText) -> Result<PostId, PostError>;

    /// Read one of the caller's posts.
    ///
    /// # Errors
    /// * `Denied` - Token not accepted by the token authority
    /// * `NotFound` - No such post owned by the caller
    /// * `DatabaseError` - Database operation failed
    async fn read_post(&self, token: &AccessToken, id: PostId) -> Result<Post, PostError>;

    /// Replace the text of one of the caller's posts.
    ///
    /// # Errors
    /// * `Denied` - Token not accepted by the token authority
    /// * `NotFound` - No such post owned by the caller
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        token: &AccessToken,
        id: PostId,
        text: PostText,
    ) -> Result<(), PostError>;

    /// Delete one of the caller's posts.
    ///
    /// # Errors
    /// * `Denied` - Token not accepted by the token authority
    /// * `NotFound` - No such post owned by the caller
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, token: &AccessToken, id: PostId) -> Result<(), PostError>;
}

/// Persistence for posts. Every read and write is scoped by owner.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, owner: UserId, text: &PostText) -> Result<PostId, PostError>;

    async fn find_owned(&self, id: PostId, owner: UserId) -> Result<Option<Post>, PostError>;

    /// # Returns
    /// Whether a row matched `(id, owner)`
    async fn update_owned(
        &self,
        id: PostId,
        owner: UserId,
        text: &PostText,
    ) -> Result<bool, PostError>;

    /// # Returns
    /// Whether a row matched `(id, owner)`
    async fn delete_owned(&self, id: PostId, owner: UserId) -> Result<bool, PostError>;
}

/// Resolves a bearer token to the identity it was issued to.
#[async_trait]
pub trait Authorizer: Send + Sync + 'static {
    /// # Errors
    /// * `Denied` - For any failure, including an unreachable authority
    async fn authorize(&self, token: &AccessToken) -> Result<UserId, PostError>;
}
