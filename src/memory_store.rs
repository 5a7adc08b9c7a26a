use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use crate::resource::{Comment, Post};
use crate::store::{CommentStore, PostStore};
use crate::types::{CommentId, PostId, PrincipalId};

/// In-memory store implementation for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    posts: RwLock<HashMap<PostId, Post>>,
    comments: RwLock<HashMap<CommentId, Comment>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a post.
    pub fn insert_post(&self, post: Post) {
        let mut guard = self.inner.posts.write().expect("poisoned lock");
        guard.insert(post.id.clone(), post);
    }

    /// Removes a post and its comments.
    pub fn remove_post(&self, id: &PostId) -> Option<Post> {
        let removed = self.inner.posts.write().expect("poisoned lock").remove(id);
        if removed.is_some() {
            let mut guard = self.inner.comments.write().expect("poisoned lock");
            guard.retain(|_, comment| &comment.post_id != id);
        }
        removed
    }

    /// Inserts or replaces a comment.
    ///
    /// Reads serve the comment joined with the stored post named by
    /// `post_id`. When no such post is stored, the copy embedded in the
    /// comment at insert time is served as is.
    pub fn insert_comment(&self, comment: Comment) {
        let mut guard = self.inner.comments.write().expect("poisoned lock");
        guard.insert(comment.id.clone(), comment);
    }

    /// Removes a comment.
    pub fn remove_comment(&self, id: &CommentId) -> Option<Comment> {
        let mut guard = self.inner.comments.write().expect("poisoned lock");
        guard.remove(id)
    }

    // Comments keep a copy of their post; serve the current one when stored.
    fn joined(&self, mut comment: Comment) -> Comment {
        let guard = self.inner.posts.read().expect("poisoned lock");
        if let Some(post) = guard.get(&comment.post_id) {
            comment.post = post.clone();
        }
        comment
    }

    fn select_comments(&self, keep: impl Fn(&Comment) -> bool) -> Vec<Comment> {
        let selected: Vec<Comment> = {
            let guard = self.inner.comments.read().expect("poisoned lock");
            guard
                .values()
                .filter(|comment| keep(*comment))
                .cloned()
                .collect()
        };
        selected
            .into_iter()
            .map(|comment| self.joined(comment))
            .collect()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn find_post(
        &self,
        id: &PostId,
    ) -> std::result::Result<Option<Post>, crate::StoreError> {
        let guard = self.inner.posts.read().expect("poisoned lock");
        Ok(guard.get(id).cloned())
    }

    async fn list_posts(&self) -> std::result::Result<Vec<Post>, crate::StoreError> {
        let guard = self.inner.posts.read().expect("poisoned lock");
        Ok(guard.values().cloned().collect())
    }

    async fn posts_by_author(
        &self,
        author: &PrincipalId,
    ) -> std::result::Result<Vec<Post>, crate::StoreError> {
        let guard = self.inner.posts.read().expect("poisoned lock");
        Ok(guard
            .values()
            .filter(|post| &post.author_id == author)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn find_comment(
        &self,
        id: &CommentId,
    ) -> std::result::Result<Option<Comment>, crate::StoreError> {
        let found = {
            let guard = self.inner.comments.read().expect("poisoned lock");
            guard.get(id).cloned()
        };
        Ok(found.map(|comment| self.joined(comment)))
    }

    async fn comments_by_post(
        &self,
        post: &PostId,
    ) -> std::result::Result<Vec<Comment>, crate::StoreError> {
        Ok(self.select_comments(|comment| &comment.post_id == post))
    }

    async fn comments_by_user(
        &self,
        user: &PrincipalId,
    ) -> std::result::Result<Vec<Comment>, crate::StoreError> {
        Ok(self.select_comments(|comment| &comment.user_id == user))
    }
}
