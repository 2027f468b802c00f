use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;

use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostText;
use crate::domain::post::models::UserId;
use crate::domain::post::ports::PostRepository;
use crate::post::errors::PostError;

/// Process-local post repository used by tests and database-less runs.
#[derive(Default)]
pub struct InMemoryPostRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    posts: HashMap<PostId, Post>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, PostError> {
        self.state
            .lock()
            .map_err(|_| PostError::DatabaseError("post repository lock poisoned".to_string()))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, owner: UserId, text: &PostText) -> Result<PostId, PostError> {
        let mut state = self.lock()?;

        state.last_id += 1;
        let id = PostId::new(state.last_id)?;
        state.posts.insert(
            id,
            Post {
                id,
                user_id: owner,
                text: text.clone(),
            },
        );

        Ok(id)
    }

    async fn find_owned(&self, id: PostId, owner: UserId) -> Result<Option<Post>, PostError> {
        Ok(self
            .lock()?
            .posts
            .get(&id)
            .filter(|post| post.user_id == owner)
            .cloned())
    }

    async fn update_owned(
        &self,
        id: PostId,
        owner: UserId,
        text: &PostText,
    ) -> Result<bool, PostError> {
        let mut state = self.lock()?;

        match state.posts.get_mut(&id) {
            Some(post) if post.user_id == owner => {
                post.text = text.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_owned(&self, id: PostId, owner: UserId) -> Result<bool, PostError> {
        let mut state = self.lock()?;

        let owned = state
            .posts
            .get(&id)
            .is_some_and(|post| post.user_id == owner);
        if owned {
            state.posts.remove(&id);
        }

        Ok(owned)
    }
}
