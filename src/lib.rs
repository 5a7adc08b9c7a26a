//! Hybrid RBAC+ABAC authorization for posts and comments.
//!
//! A static [`PolicyTable`] maps role × resource kind × action to a
//! [`PermissionRule`]: unconditional allow/deny, or a predicate over the
//! principal and the resource instance. [`Engine::has_permission`] OR-s the
//! rules of every role the principal holds. The default behavior is
//! deny-by-default, and predicate rules deny when no instance is supplied.
//!
//! # Examples
//!
//! ```
//! use rs_authz::{Action, Engine, Post, PostId, Posts, Principal, PrincipalId, Role};
//!
//! let engine = Engine::default();
//! let reader = Principal::new(PrincipalId::try_from("user1").unwrap(), [Role::User]).unwrap();
//! let post = Post {
//!     id: PostId::try_from("post1").unwrap(),
//!     author_id: PrincipalId::try_from("user2").unwrap(),
//!     title: "Hello".to_string(),
//!     content: "First post".to_string(),
//!     is_published: true,
//! };
//!
//! assert!(engine.has_permission(&reader, Posts, Action::View, Some(&post)));
//! assert!(!engine.has_permission(&reader, Posts, Action::Update, Some(&post)));
//! assert!(!engine.has_permission(&reader, Posts, Action::View, None));
//! ```
//!
//! Store-backed checks with the in-memory store (enable `memory-store`; the
//! crate's own unit tests always build it, so `cargo test` covers [`Guard`]):
//! ```no_run
//! # #[cfg(feature = "memory-store")]
//! # {
//! use rs_authz::{Guard, MemoryStore, PostId, Principal, PrincipalId, Role};
//! use futures::executor::block_on;
//! let guard = Guard::new(MemoryStore::new());
//! let principal = Principal::new(PrincipalId::try_from("user1").unwrap(), [Role::User]).unwrap();
//! let _ = block_on(guard.view_post(&principal, &PostId::try_from("post1").unwrap()));
//! # }
//! ```
#![forbid(unsafe_code)]

mod engine;
mod error;
mod guard;
mod permission;
mod policy;
mod resource;
mod store;
mod types;

#[cfg(any(test, feature = "memory-store"))]
#[cfg_attr(not(feature = "memory-store"), allow(dead_code))]
mod memory_store;

pub use crate::engine::{Decision, Engine, EngineBuilder};
pub use crate::error::{Error, Result, StoreError};
pub use crate::guard::Guard;
pub use crate::permission::{Action, Permission, PermissionRule, PredicateFn};
pub use crate::policy::{PolicyTable, ResourcePolicy, RolePolicy};
pub use crate::resource::{Comment, Comments, Post, Posts, ResourceKind};
pub use crate::store::{CommentStore, PostStore, Store};
pub use crate::types::{CommentId, PostId, Principal, PrincipalId, Role};

#[cfg(feature = "memory-store")]
pub use crate::memory_store::MemoryStore;
