use crate::error::{Error, Result};
use crate::resource::ResourceKind;
use crate::types::Principal;
use std::fmt;
use std::str::FromStr;

/// Action on a resource.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    /// Read an instance.
    View,
    /// Create a new instance.
    Create,
    /// Modify an instance.
    Update,
    /// Remove an instance.
    Delete,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Update, Action::Delete];

    /// Returns the lower-case action name.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidAction(trimmed.to_string()))
    }
}

impl TryFrom<&str> for Action {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

/// Attribute check over the principal and one resource instance.
pub type PredicateFn<D> = fn(&Principal, &D) -> bool;

/// Rule attached to a (role, resource kind, action) entry.
pub enum PermissionRule<D> {
    /// Unconditionally grants the action.
    Allow,
    /// Unconditionally denies the action.
    Deny,
    /// Grants the action when the check holds for the supplied instance.
    ///
    /// Never satisfied without instance data.
    Predicate(PredicateFn<D>),
}

impl<D> PermissionRule<D> {
    /// Resolves the rule for `principal` against optional instance data.
    pub fn resolve(&self, principal: &Principal, data: Option<&D>) -> bool {
        match self {
            PermissionRule::Allow => true,
            PermissionRule::Deny => false,
            PermissionRule::Predicate(check) => data.is_some_and(|data| check(principal, data)),
        }
    }

    /// Returns whether the rule needs instance data to grant anything.
    pub fn requires_data(&self) -> bool {
        matches!(self, PermissionRule::Predicate(_))
    }
}

// Manual impls: derives would demand `D: Clone`/`D: Debug`.
impl<D> Clone for PermissionRule<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for PermissionRule<D> {}

impl<D> fmt::Debug for PermissionRule<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionRule::Allow => f.write_str("Allow"),
            PermissionRule::Deny => f.write_str("Deny"),
            PermissionRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A `resource:action` pair, used in errors and logs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Permission {
    resource: &'static str,
    action: Action,
}

impl Permission {
    /// Creates the permission for `action` on resource kind `K`.
    pub fn of<K: ResourceKind>(action: Action) -> Self {
        Self {
            resource: K::NAME,
            action,
        }
    }

    /// Returns the resource family name.
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Returns the action.
    pub fn action(&self) -> Action {
        self.action
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}
