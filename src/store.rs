use crate::error::StoreError;
use crate::resource::{Comment, Post};
use crate::types::{CommentId, PostId, PrincipalId};
use async_trait::async_trait;

/// Store interface for posts.
#[async_trait]
pub trait PostStore {
    /// Returns a post by id.
    async fn find_post(&self, id: &PostId) -> std::result::Result<Option<Post>, StoreError>;

    /// Returns every post.
    async fn list_posts(&self) -> std::result::Result<Vec<Post>, StoreError>;

    /// Returns posts written by `author`.
    async fn posts_by_author(
        &self,
        author: &PrincipalId,
    ) -> std::result::Result<Vec<Post>, StoreError>;
}

/// Store interface for comments.
///
/// Comments are returned joined with their parent post.
#[async_trait]
pub trait CommentStore {
    /// Returns a comment by id.
    async fn find_comment(
        &self,
        id: &CommentId,
    ) -> std::result::Result<Option<Comment>, StoreError>;

    /// Returns comments on a post.
    async fn comments_by_post(
        &self,
        post: &PostId,
    ) -> std::result::Result<Vec<Comment>, StoreError>;

    /// Returns comments written by `user`.
    async fn comments_by_user(
        &self,
        user: &PrincipalId,
    ) -> std::result::Result<Vec<Comment>, StoreError>;
}

/// Composite store trait.
pub trait Store: PostStore + CommentStore + Send + Sync {}

impl<T> Store for T where T: PostStore + CommentStore + Send + Sync {}
