use crate::error::{Error, Result};
use crate::permission::{Action, Permission};
use crate::policy::PolicyTable;
use crate::resource::ResourceKind;
use crate::types::Principal;

/// Authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Permission is granted.
    Allow,
    /// Permission is denied.
    Deny,
}

impl Decision {
    /// Returns `true` if this decision is [`Decision::Allow`].
    pub fn is_allow(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// RBAC+ABAC evaluator over an immutable [`PolicyTable`].
///
/// The engine only borrows the table, so it is `Copy` and can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'p> {
    policy: &'p PolicyTable,
}

/// Builder for [`Engine`].
#[derive(Debug, Clone, Copy)]
pub struct EngineBuilder<'p> {
    policy: &'p PolicyTable,
}

impl EngineBuilder<'static> {
    /// Creates a new builder using the built-in policy table.
    pub fn new() -> Self {
        Self {
            policy: PolicyTable::standard(),
        }
    }
}

impl Default for EngineBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> EngineBuilder<'p> {
    /// Replaces the policy table.
    pub fn policy<'q>(self, policy: &'q PolicyTable) -> EngineBuilder<'q> {
        EngineBuilder { policy }
    }

    /// Builds the engine.
    pub fn build(self) -> Engine<'p> {
        Engine {
            policy: self.policy,
        }
    }
}

impl Default for Engine<'static> {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

impl<'p> Engine<'p> {
    /// Returns the policy table consulted by this engine.
    pub fn policy(&self) -> &'p PolicyTable {
        self.policy
    }

    /// Decides whether `principal` may perform `action` on resource kind `K`.
    ///
    /// Each role is looked up independently and the results are OR-ed: the
    /// first role that grants wins. A missing entry denies, and a predicate
    /// rule denies when `data` is `None`. An empty role set denies.
    pub fn has_permission<K: ResourceKind>(
        &self,
        principal: &Principal,
        _kind: K,
        action: Action,
        data: Option<&K::Data>,
    ) -> bool {
        for &role in principal.roles() {
            let Some(rule) = self.policy.lookup::<K>(role, action) else {
                tracing::trace!(%role, resource = K::NAME, %action, "no rule");
                continue;
            };
            if rule.resolve(principal, data) {
                tracing::trace!(%role, resource = K::NAME, %action, ?rule, "granted");
                return true;
            }
            if rule.requires_data() && data.is_none() {
                tracing::trace!(%role, resource = K::NAME, %action, "predicate without data");
            }
        }

        tracing::trace!(
            principal = %principal.id(),
            resource = K::NAME,
            %action,
            "permission denied"
        );
        false
    }

    /// Same as [`Engine::has_permission`], as a [`Decision`].
    pub fn decide<K: ResourceKind>(
        &self,
        principal: &Principal,
        kind: K,
        action: Action,
        data: Option<&K::Data>,
    ) -> Decision {
        Decision::from(self.has_permission(principal, kind, action, data))
    }

    /// Fails with [`Error::Forbidden`] when the action is not permitted.
    pub fn authorize<K: ResourceKind>(
        &self,
        principal: &Principal,
        kind: K,
        action: Action,
        data: Option<&K::Data>,
    ) -> Result<()> {
        if self.has_permission(principal, kind, action, data) {
            return Ok(());
        }
        let permission = Permission::of::<K>(action);
        tracing::debug!(principal = %principal.id(), %permission, "forbidden");
        Err(Error::Forbidden { permission })
    }

    /// Keeps the fetched items on which `action` is permitted.
    pub fn filter<K, I>(
        &self,
        principal: &Principal,
        kind: K,
        action: Action,
        items: I,
    ) -> Vec<K::Data>
    where
        K: ResourceKind,
        I: IntoIterator<Item = K::Data>,
    {
        items
            .into_iter()
            .filter(|item| self.has_permission(principal, kind, action, Some(item)))
            .collect()
    }
}
