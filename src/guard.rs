//! Caller-side enforcement: fetch, decide, then surface the failure.
//!
//! The engine cannot tell a missing entity from a forbidden one. [`Guard`]
//! loads the instance first, so a missing entity yields [`Error::NotFound`]
//! and a denied action on an existing one yields [`Error::Forbidden`].
//! Lists are fetched in full and filtered with the `view` rule afterwards.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::permission::Action;
use crate::resource::{Comment, Comments, Post, Posts, ResourceKind};
use crate::store::Store;
use crate::types::{CommentId, PostId, Principal};

/// Store-backed authorization for post and comment operations.
///
/// Every method only reads from the store; applying the change is left to
/// the caller once the guard has returned `Ok`.
#[derive(Debug, Clone)]
pub struct Guard<'p, S> {
    engine: Engine<'p>,
    store: S,
}

impl<S> Guard<'static, S> {
    /// Creates a guard using the built-in policy table.
    pub fn new(store: S) -> Self {
        Self::with_engine(Engine::default(), store)
    }
}

impl<'p, S> Guard<'p, S> {
    /// Creates a guard with a custom engine.
    pub fn with_engine(engine: Engine<'p>, store: S) -> Self {
        Self { engine, store }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &Engine<'p> {
        &self.engine
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> Guard<'_, S>
where
    S: Store,
{
    /// Checks that the principal may create posts at all.
    pub fn authorize_create_post(&self, principal: &Principal) -> Result<()> {
        self.check(principal, Posts, Action::Create, None)
    }

    /// Returns a post the principal may view.
    pub async fn view_post(&self, principal: &Principal, id: &PostId) -> Result<Post> {
        let post = self.load_post(id).await?;
        self.check(principal, Posts, Action::View, Some(&post))?;
        Ok(post)
    }

    /// Returns the post when the principal may update it.
    pub async fn update_post(&self, principal: &Principal, id: &PostId) -> Result<Post> {
        let post = self.load_post(id).await?;
        self.check(principal, Posts, Action::Update, Some(&post))?;
        Ok(post)
    }

    /// Returns the post when the principal may delete it.
    pub async fn delete_post(&self, principal: &Principal, id: &PostId) -> Result<Post> {
        let post = self.load_post(id).await?;
        self.check(principal, Posts, Action::Delete, Some(&post))?;
        Ok(post)
    }

    /// Returns every post the principal may view.
    pub async fn visible_posts(&self, principal: &Principal) -> Result<Vec<Post>> {
        let posts = self.store.list_posts().await.map_err(Error::from)?;
        Ok(self.engine.filter(principal, Posts, Action::View, posts))
    }

    /// Returns the principal's own posts that they may view.
    pub async fn authored_posts(&self, principal: &Principal) -> Result<Vec<Post>> {
        let posts = self
            .store
            .posts_by_author(principal.id())
            .await
            .map_err(Error::from)?;
        Ok(self.engine.filter(principal, Posts, Action::View, posts))
    }

    /// Checks that the principal may comment on a post and returns the post.
    ///
    /// The rule is evaluated against a draft comment authored by the
    /// principal.
    pub async fn authorize_create_comment(
        &self,
        principal: &Principal,
        post_id: &PostId,
    ) -> Result<Post> {
        let post = self.load_post(post_id).await?;
        let draft = Comment::draft(principal.id().clone(), post);
        self.check(principal, Comments, Action::Create, Some(&draft))?;
        Ok(draft.post)
    }

    /// Returns the comments on a post that the principal may view.
    pub async fn comments_for_post(
        &self,
        principal: &Principal,
        post_id: &PostId,
    ) -> Result<Vec<Comment>> {
        let comments = self
            .store
            .comments_by_post(post_id)
            .await
            .map_err(Error::from)?;
        Ok(self.engine.filter(principal, Comments, Action::View, comments))
    }

    /// Returns the principal's own comments that they may view.
    pub async fn comments_by_user(&self, principal: &Principal) -> Result<Vec<Comment>> {
        let comments = self
            .store
            .comments_by_user(principal.id())
            .await
            .map_err(Error::from)?;
        Ok(self.engine.filter(principal, Comments, Action::View, comments))
    }

    /// Returns the comment when the principal may update it.
    pub async fn update_comment(&self, principal: &Principal, id: &CommentId) -> Result<Comment> {
        let comment = self.load_comment(id).await?;
        self.check(principal, Comments, Action::Update, Some(&comment))?;
        Ok(comment)
    }

    /// Returns the comment when the principal may delete it.
    pub async fn delete_comment(&self, principal: &Principal, id: &CommentId) -> Result<Comment> {
        let comment = self.load_comment(id).await?;
        self.check(principal, Comments, Action::Delete, Some(&comment))?;
        Ok(comment)
    }

    async fn load_post(&self, id: &PostId) -> Result<Post> {
        self.store
            .find_post(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::NotFound {
                resource: Posts::NAME,
                id: id.to_string(),
            })
    }

    async fn load_comment(&self, id: &CommentId) -> Result<Comment> {
        self.store
            .find_comment(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::NotFound {
                resource: Comments::NAME,
                id: id.to_string(),
            })
    }

    fn check<K: ResourceKind>(
        &self,
        principal: &Principal,
        kind: K,
        action: Action,
        data: Option<&K::Data>,
    ) -> Result<()> {
        self.engine
            .authorize(principal, kind, action, data)
            .inspect_err(|err| {
                tracing::debug!(principal = %principal.id(), error = %err, "guard refused");
            })
    }
}
