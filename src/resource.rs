//! Protected resource families and the instance data their rules inspect.

use crate::policy::{ResourcePolicy, RolePolicy};
use crate::types::{CommentId, PostId, PrincipalId};
use std::fmt;

/// A post as loaded by the persistence layer.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Post {
    /// Post identifier.
    pub id: PostId,
    /// Author of the post.
    pub author_id: PrincipalId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Whether the post is visible to everyone.
    pub is_published: bool,
}

/// A comment joined with its parent post.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// Comment identifier.
    pub id: CommentId,
    /// Author of the comment.
    pub user_id: PrincipalId,
    /// Parent post identifier.
    pub post_id: PostId,
    /// Comment body.
    pub content: String,
    /// Parent post.
    pub post: Post,
}

impl Comment {
    /// Creates an unsaved comment by `user_id` on `post`.
    ///
    /// Used to evaluate `create` rules before the comment exists.
    pub fn draft(user_id: PrincipalId, post: Post) -> Self {
        Self {
            id: CommentId::from_string(String::new()),
            user_id,
            post_id: post.id.clone(),
            content: String::new(),
            post,
        }
    }
}

/// A family of protected resources with its own instance data shape.
///
/// Implemented by the zero-sized markers [`Posts`] and [`Comments`]; the
/// associated [`Data`](ResourceKind::Data) type fixes what predicate rules
/// for this kind may inspect.
pub trait ResourceKind: Copy + fmt::Debug + Send + Sync + 'static {
    /// Instance data evaluated by predicate rules.
    type Data: 'static;

    /// Resource family name, e.g. `posts`.
    const NAME: &'static str;

    /// Selects this kind's rules from a role's policy.
    fn rules(policy: &RolePolicy) -> &ResourcePolicy<Self::Data>;
}

/// Marker for the `posts` resource family.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Posts;

impl ResourceKind for Posts {
    type Data = Post;

    const NAME: &'static str = "posts";

    fn rules(policy: &RolePolicy) -> &ResourcePolicy<Post> {
        &policy.posts
    }
}

/// Marker for the `comments` resource family.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Comments;

impl ResourceKind for Comments {
    type Data = Comment;

    const NAME: &'static str = "comments";

    fn rules(policy: &RolePolicy) -> &ResourcePolicy<Comment> {
        &policy.comments
    }
}
