//! Role → resource kind → action policy table.
//!
//! Tables are plain literal values: every entry is declared directly, no entry
//! refers to another, and predicates only read the principal and the instance
//! handed to them. [`PolicyTable::standard`] is the built-in table shared by
//! the whole process.

use crate::permission::{Action, PermissionRule};
use crate::resource::{Comment, Post, ResourceKind};
use crate::types::{Principal, Role};

use crate::permission::PermissionRule::{Allow, Predicate};

/// Rules for each action on one resource kind. `None` denies.
#[derive(Debug)]
pub struct ResourcePolicy<D> {
    /// Rule for [`Action::View`].
    pub view: Option<PermissionRule<D>>,
    /// Rule for [`Action::Create`].
    pub create: Option<PermissionRule<D>>,
    /// Rule for [`Action::Update`].
    pub update: Option<PermissionRule<D>>,
    /// Rule for [`Action::Delete`].
    pub delete: Option<PermissionRule<D>>,
}

impl<D> ResourcePolicy<D> {
    /// A policy with no entries.
    pub const fn empty() -> Self {
        Self {
            view: None,
            create: None,
            update: None,
            delete: None,
        }
    }

    /// Returns the rule declared for `action`, if any.
    pub fn rule(&self, action: Action) -> Option<PermissionRule<D>> {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }
}

/// Rules held by a single role.
#[derive(Debug)]
pub struct RolePolicy {
    /// Rules on posts.
    pub posts: ResourcePolicy<Post>,
    /// Rules on comments.
    pub comments: ResourcePolicy<Comment>,
}

impl RolePolicy {
    /// A role with no grants.
    pub const fn empty() -> Self {
        Self {
            posts: ResourcePolicy::empty(),
            comments: ResourcePolicy::empty(),
        }
    }
}

/// Immutable policy table keyed by role.
#[derive(Debug)]
pub struct PolicyTable {
    /// Policy of [`Role::Admin`].
    pub admin: RolePolicy,
    /// Policy of [`Role::Moderator`].
    pub moderator: RolePolicy,
    /// Policy of [`Role::User`].
    pub user: RolePolicy,
}

impl PolicyTable {
    /// Returns the built-in table.
    pub fn standard() -> &'static PolicyTable {
        &STANDARD
    }

    /// Returns the policy of `role`.
    pub fn role(&self, role: Role) -> &RolePolicy {
        match role {
            Role::Admin => &self.admin,
            Role::Moderator => &self.moderator,
            Role::User => &self.user,
        }
    }

    /// Looks up the rule for (`role`, `K`, `action`).
    pub fn lookup<K: ResourceKind>(
        &self,
        role: Role,
        action: Action,
    ) -> Option<PermissionRule<K::Data>> {
        K::rules(self.role(role)).rule(action)
    }
}

static STANDARD: PolicyTable = PolicyTable {
    admin: RolePolicy {
        posts: ResourcePolicy {
            view: Some(Allow),
            create: Some(Allow),
            update: Some(Allow),
            delete: Some(Allow),
        },
        comments: ResourcePolicy {
            view: Some(Allow),
            create: Some(Allow),
            update: Some(Allow),
            delete: Some(Allow),
        },
    },
    moderator: RolePolicy {
        posts: ResourcePolicy {
            view: Some(Predicate(post_authored_or_published)),
            create: Some(Allow),
            update: Some(Predicate(post_authored)),
            delete: Some(Predicate(post_authored_or_published)),
        },
        comments: ResourcePolicy {
            view: Some(Allow),
            create: Some(Predicate(parent_published_or_authored)),
            update: Some(Predicate(comment_authored)),
            delete: Some(Allow),
        },
    },
    user: RolePolicy {
        posts: ResourcePolicy {
            view: Some(Predicate(post_authored_or_published)),
            create: Some(Allow),
            update: Some(Predicate(post_authored)),
            delete: Some(Predicate(post_authored)),
        },
        comments: ResourcePolicy {
            view: Some(Predicate(parent_published_or_authored)),
            create: Some(Predicate(parent_published_or_authored)),
            update: Some(Predicate(comment_authored)),
            delete: Some(Predicate(comment_or_parent_authored)),
        },
    },
};

fn post_authored(principal: &Principal, post: &Post) -> bool {
    &post.author_id == principal.id()
}

fn post_authored_or_published(principal: &Principal, post: &Post) -> bool {
    post_authored(principal, post) || post.is_published
}

fn parent_published_or_authored(principal: &Principal, comment: &Comment) -> bool {
    comment.post.is_published || post_authored(principal, &comment.post)
}

fn comment_authored(principal: &Principal, comment: &Comment) -> bool {
    &comment.user_id == principal.id()
}

fn comment_or_parent_authored(principal: &Principal, comment: &Comment) -> bool {
    comment_authored(principal, comment) || post_authored(principal, &comment.post)
}
